//! Tests for the built-in and custom collapse policies

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use sockettile::algorithm::bitset::TileBitset;
    use sockettile::algorithm::selection::{
        SelectionContext, SelectionPolicy, Selector, select_first, select_uniform,
        select_weighted,
    };
    use sockettile::spatial::DomainGrid;
    use sockettile::tiles::{Prototype, PrototypeRegistry, Sides};

    fn weighted_registry() -> PrototypeRegistry {
        let open = Sides::parse("0s", "0s", "0s", "0s");
        let mut registry = PrototypeRegistry::new();
        registry
            .add(vec![
                Prototype::new("X", open.clone()).with_weight(9.0),
                Prototype::new("Y", open).with_weight(1.0),
            ])
            .unwrap();
        registry
    }

    #[test]
    fn test_first_picks_lowest_index() {
        let domain = TileBitset::from_indices(&[4, 2, 7], 8);
        assert_eq!(select_first(&domain), Some(2));
        assert_eq!(select_first(&TileBitset::new(8)), None);
    }

    // Tests uniform picks stay inside the domain and reach every member
    #[test]
    fn test_uniform_covers_domain() {
        let domain = TileBitset::from_indices(&[1, 3, 6], 8);
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [0usize; 8];
        for _ in 0..600 {
            let pick = select_uniform(&domain, &mut rng).unwrap();
            assert!(domain.contains(pick));
            seen[pick] += 1;
        }
        for member in [1, 3, 6] {
            assert!(seen[member] > 120, "member {member} drawn {} times", seen[member]);
        }
        assert_eq!(select_uniform(&TileBitset::new(8), &mut rng), None);
    }

    // Tests weighted draws follow the 9:1 weight ratio
    // Verified by ignoring weights and drawing uniformly
    #[test]
    fn test_weighted_follows_ratio() {
        let registry = weighted_registry();
        let domain = registry.full_domain();
        let mut rng = StdRng::seed_from_u64(2024);
        let draws = 2000;
        let x_count = (0..draws)
            .filter(|_| select_weighted(&domain, &registry, &mut rng) == Some(0))
            .count();
        let fraction = x_count as f64 / f64::from(draws);
        assert!((fraction - 0.9).abs() < 0.03, "fraction of X was {fraction}");
    }

    #[test]
    fn test_weighted_respects_domain() {
        let registry = weighted_registry();
        let only_y = TileBitset::single(1, registry.len());
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(select_weighted(&only_y, &registry, &mut rng), Some(1));
        }
    }

    // Closures act as selectors through the blanket impl
    #[test]
    fn test_custom_closure_policy() {
        let registry = weighted_registry();
        let grid = DomainGrid::new(1, 1, &registry.full_domain()).unwrap();
        let domain = registry.full_domain();
        let context = SelectionContext {
            registry: &registry,
            grid: &grid,
            x: 0,
            y: 0,
            domain: &domain,
        };
        let mut rng = StdRng::seed_from_u64(0);

        let mut policy = SelectionPolicy::custom(|ctx: &SelectionContext<'_>, _: &mut StdRng| {
            ctx.domain.iter().last()
        });
        assert_eq!(policy.select(&context, &mut rng), Some(1));
        assert_eq!(policy.name(), "custom");

        let mut first = SelectionPolicy::First;
        assert_eq!(first.select(&context, &mut rng), Some(0));
        assert_eq!(format!("{:?}", SelectionPolicy::default()), "weighted");
    }
}
