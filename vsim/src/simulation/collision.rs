//! Narrow-phase circle/circle resolution and the per-sub-step collision pass
//!
//! Overlaps are resolved by moving positions only. `position_prev` is left
//! alone, so the correction shows up as a velocity change at the next
//! Verlet step.

use crate::simulation::params::Parameters;
use crate::simulation::spatial::SpatialIndex;
use crate::simulation::states::Body;

/// Counters for one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    pub candidates: usize, // pairs handed to the narrow phase
    pub contacts: usize, // pairs actually pushed apart
}

/// Push two overlapping circles apart along their center line.
///
/// The correction is split by radius ratio, so the larger circle moves less.
/// Returns `true` if positions changed. Non-overlapping pairs and pairs whose
/// centers are closer than `eps` are left untouched.
pub fn resolve_pair(a: &mut Body, b: &mut Body, response_coef: f64, eps: f64) -> bool {
    let delta = a.position - b.position;
    let dist2 = delta.norm_squared();
    let min_dist = a.radius() + b.radius();
    if dist2 >= min_dist * min_dist {
        return false;
    }

    let dist = dist2.sqrt();
    if dist < eps {
        return false;
    }

    let n = delta / dist;
    let ratio_a = a.radius() / min_dist;
    let ratio_b = 1.0 - ratio_a;
    // overlap is negative, so delta_pos is too
    let delta_pos = 0.5 * response_coef * (dist - min_dist);

    a.position -= n * (ratio_b * delta_pos);
    b.position += n * (ratio_a * delta_pos);
    true
}

/// Broad phase + narrow phase over all bodies.
///
/// Rebuilds `index` from current positions, then resolves every candidate
/// pair it yields. Cell membership is not refreshed while resolving.
pub fn collide(bodies: &mut [Body], index: &mut SpatialIndex, params: &Parameters) -> CollisionStats {
    let mut stats = CollisionStats::default();
    if bodies.len() < 2 {
        return stats;
    }

    index.rebuild(bodies);
    index.for_each_pair(|i, j| {
        stats.candidates += 1;
        let (a, b) = pair_mut(bodies, i, j);
        if resolve_pair(a, b, params.response_coef, params.eps) {
            stats.contacts += 1;
        }
    });

    stats
}

/// Two distinct mutable bodies, returned in `(i, j)` order
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::NVec2;

    const COEF: f64 = 0.75;
    const EPS: f64 = 1e-4;

    fn body(x: f64, y: f64, r: f64) -> Body {
        Body::new(NVec2::new(x, y), r)
    }

    #[test]
    fn separated_pair_is_untouched() {
        let mut a = body(0.0, 0.0, 1.0);
        let mut b = body(2.0, 0.0, 1.0);
        assert!(!resolve_pair(&mut a, &mut b, COEF, EPS));
        assert_eq!(a.position, NVec2::new(0.0, 0.0));
        assert_eq!(b.position, NVec2::new(2.0, 0.0));
    }

    #[test]
    fn coincident_pair_is_untouched() {
        let mut a = body(5.0, 5.0, 1.0);
        let mut b = body(5.0 + 1e-6, 5.0, 1.0);
        assert!(!resolve_pair(&mut a, &mut b, COEF, EPS));
        assert_eq!(a.position, NVec2::new(5.0, 5.0));
    }

    #[test]
    fn overlapping_pair_moves_apart() {
        let mut a = body(0.0, 0.0, 1.0);
        let mut b = body(1.0, 0.5, 1.0);
        let before = (a.position - b.position).norm();
        assert!(resolve_pair(&mut a, &mut b, COEF, EPS));
        let after = (a.position - b.position).norm();
        assert!(after > before, "pair moved together: {before} -> {after}");
    }

    #[test]
    fn equal_radii_move_equal_and_opposite() {
        let mut a = body(0.0, 0.0, 1.0);
        let mut b = body(1.0, 0.0, 1.0);
        resolve_pair(&mut a, &mut b, COEF, EPS);

        let da = a.position - NVec2::new(0.0, 0.0);
        let db = b.position - NVec2::new(1.0, 0.0);
        assert!((da + db).norm() < 1e-12);
        // overlap 1.0 -> each moves 0.5 * 0.75 * 1.0 * 0.5
        assert!((da.x + 0.1875).abs() < 1e-12);
        assert!((db.x - 0.1875).abs() < 1e-12);
    }

    #[test]
    fn larger_body_moves_less() {
        let mut a = body(0.0, 0.0, 3.0);
        let mut b = body(2.0, 0.0, 1.0);
        resolve_pair(&mut a, &mut b, COEF, EPS);

        let moved_a = a.position.norm();
        let moved_b = (b.position - NVec2::new(2.0, 0.0)).norm();
        assert!(moved_a < moved_b, "a moved {moved_a}, b moved {moved_b}");
    }

    #[test]
    fn pair_mut_returns_requested_order() {
        let mut bodies = vec![body(0.0, 0.0, 1.0), body(1.0, 0.0, 1.0), body(2.0, 0.0, 1.0)];
        let (a, b) = pair_mut(&mut bodies, 2, 0);
        assert_eq!(a.position.x, 2.0);
        assert_eq!(b.position.x, 0.0);
    }

    #[test]
    fn collide_resolves_contact_across_cell_border() {
        // Centers on either side of x = 50, overlapping by 4
        let mut bodies = vec![body(48.0, 10.0, 5.0), body(54.0, 10.0, 5.0)];
        let mut index = SpatialIndex::new(50.0);
        let params = Parameters::default();

        let stats = collide(&mut bodies, &mut index, &params);
        assert_eq!(stats.contacts, 1);
        assert!(bodies[1].position.x - bodies[0].position.x > 6.0);
    }

    #[test]
    fn collide_skips_single_body() {
        let mut bodies = vec![body(0.0, 0.0, 1.0)];
        let mut index = SpatialIndex::new(50.0);
        let stats = collide(&mut bodies, &mut index, &Parameters::default());
        assert_eq!(stats, CollisionStats::default());
        assert_eq!(index.populated_cells(), 0);
    }
}
