//! Random initial placement.
//!
//! Samples every macro's position uniformly within the layout bounds. This
//! is the starting point for simulated annealing; it makes no attempt to
//! avoid overlap.

use dfmp_config::FixedMacroPolicy;
use dfmp_model::{Bounds, Design};
use rand::Rng;

/// Returns a flattened `[x0, y0, x1, y1, ...]` vector with a uniform random
/// position per macro.
///
/// Under [`FixedMacroPolicy::Pinned`], fixed macros keep their current
/// position.
pub fn random_positions(
    design: &Design,
    bounds: &Bounds,
    policy: FixedMacroPolicy,
    rng: &mut impl Rng,
) -> Vec<f64> {
    let mut positions = Vec::with_capacity(design.macro_count() * 2);
    for m in design.macros() {
        if m.is_fixed() && policy == FixedMacroPolicy::Pinned {
            let p = m.position();
            positions.extend([p.x, p.y]);
        } else {
            positions.push(rng.gen_range(bounds.min_x..=bounds.max_x));
            positions.push(rng.gen_range(bounds.min_y..=bounds.max_y));
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfmp_model::Macro;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn design() -> Design {
        let mut d = Design::new();
        for i in 0..20 {
            d.add_macro(Macro::new(format!("m{i}"), 1.0, 1.0, false))
                .unwrap();
        }
        let fixed = d.add_macro(Macro::new("pad", 1.0, 1.0, true)).unwrap();
        d.macro_mut(fixed).set_position(-50.0, -50.0);
        d
    }

    #[test]
    fn samples_inside_bounds() {
        let d = design();
        let bounds = Bounds::new(10.0, 20.0, -5.0, 5.0);
        let mut rng = StdRng::seed_from_u64(1);
        let pos = random_positions(&d, &bounds, FixedMacroPolicy::Movable, &mut rng);
        assert_eq!(pos.len(), 42);
        for xy in pos.chunks_exact(2) {
            assert!((10.0..=20.0).contains(&xy[0]));
            assert!((-5.0..=5.0).contains(&xy[1]));
        }
    }

    #[test]
    fn pinned_fixed_macros_keep_position() {
        let d = design();
        let bounds = Bounds::new(0.0, 100.0, 0.0, 100.0);
        let mut rng = StdRng::seed_from_u64(2);
        let pos = random_positions(&d, &bounds, FixedMacroPolicy::Pinned, &mut rng);
        assert_eq!(&pos[40..], &[-50.0, -50.0]);
    }

    #[test]
    fn every_macro_is_seeded() {
        let d = design();
        let bounds = Bounds::new(0.0, 100.0, 0.0, 100.0);
        let mut rng = StdRng::seed_from_u64(3);
        let pos = random_positions(&d, &bounds, FixedMacroPolicy::Movable, &mut rng);
        let distinct: std::collections::HashSet<u64> =
            pos.iter().step_by(2).map(|x| x.to_bits()).collect();
        assert_eq!(distinct.len(), d.macro_count());
    }

    #[test]
    fn degenerate_bounds() {
        let d = design();
        let bounds = Bounds::new(3.0, 3.0, 4.0, 4.0);
        let mut rng = StdRng::seed_from_u64(4);
        let pos = random_positions(&d, &bounds, FixedMacroPolicy::Movable, &mut rng);
        assert!(pos.chunks_exact(2).all(|xy| xy == [3.0, 4.0]));
    }
}
