//! Tests for worklist propagation over the domain grid

#[cfg(test)]
mod tests {
    use sockettile::algorithm::propagation::{Worklist, propagate};
    use sockettile::spatial::DomainGrid;
    use sockettile::tiles::{Prototype, PrototypeRegistry, Sides};
    use sockettile::{TileCollapse, TileError};

    fn stripes() -> Vec<Prototype> {
        vec![
            Prototype::new("A", Sides::parse("0s", "0s", "0s", "0s")),
            Prototype::new("B", Sides::parse("1s", "1s", "0s", "0s")),
            Prototype::new("C", Sides::parse("1s", "0s", "0s", "0s")),
        ]
    }

    fn solver(width: usize, height: usize) -> TileCollapse {
        let mut solver = TileCollapse::with_seed(width, height, 7).unwrap();
        solver.add_prototypes(stripes()).unwrap();
        solver
    }

    fn sizes(solver: &TileCollapse) -> Vec<usize> {
        solver.grid().cells().map(|(_, d)| d.count()).collect()
    }

    // Forcing A at the right end prunes only what A's left side rejects
    // Verified by skipping the re-queue of changed neighbours
    #[test]
    fn test_cascade_along_row() {
        let mut solver = solver(4, 1);
        let report = solver.set(3, 0, &["A"]).unwrap();

        assert_eq!(solver.domain_ids(2, 0).unwrap(), ["A", "C"]);
        assert_eq!(solver.domain_ids(1, 0).unwrap().len(), 3);
        assert_eq!(report.visited, 2);
        assert_eq!(report.removed, 1);
    }

    // A on the left end admits only A to its right, all the way along
    #[test]
    fn test_cascade_reaches_far_end() {
        let mut solver = solver(4, 1);
        solver.set(0, 0, &["A"]).unwrap();
        for x in 0..4 {
            assert_eq!(solver.domain_ids(x, 0).unwrap(), ["A"]);
        }
    }

    // Tests domains never grow during propagation
    #[test]
    fn test_monotonic_shrink() {
        let mut solver = solver(5, 4);
        let mut previous = sizes(&solver);
        for (x, y, id) in [(0, 0, "B"), (4, 3, "A"), (2, 2, "C")] {
            solver.set(x, y, &[id]).unwrap();
            let current = sizes(&solver);
            for (cell, (before, after)) in previous.iter().zip(&current).enumerate() {
                if (cell / 4, cell % 4) != (x, y) {
                    assert!(after <= before, "cell {cell} grew from {before} to {after}");
                }
            }
            previous = current;
        }
    }

    // A second run from the same seed changes nothing
    #[test]
    fn test_idempotent() {
        let mut solver = solver(4, 3);
        solver.set(1, 1, &["B"]).unwrap();
        let snapshot = sizes(&solver);

        let report = solver.propagate(1, 1).unwrap();
        assert_eq!(report.removed, 0);
        assert_eq!(report.visited, 1);
        assert_eq!(sizes(&solver), snapshot);
    }

    // An emptied cell wipes its neighbours rather than aborting
    #[test]
    fn test_empty_domain_keeps_draining() {
        let mut solver = solver(3, 3);
        solver.set(1, 1, &[] as &[&str]).unwrap();
        assert!(sizes(&solver).iter().all(|&size| size == 0));
    }

    // A neighbour the sockets allow is still removed when an antisocket forbids it
    // Verified by propagating the allowed table alone
    #[test]
    fn test_antisocket_prunes_allowed_neighbour() {
        let open = Sides::parse("0s", "0s", "0s", "0s");
        let mut solver = TileCollapse::with_seed(3, 1, 7).unwrap();
        solver
            .add_prototypes([
                Prototype::new("a", open.clone()).with_antisockets(Sides::parse("", "xs", "", "")),
                Prototype::new("b", open).with_antisockets(Sides::parse("xs", "", "", "")),
            ])
            .unwrap();

        let report = solver.set(0, 0, &["a"]).unwrap();
        assert_eq!(solver.domain_ids(1, 0).unwrap(), ["a"]);
        assert_eq!(solver.domain_ids(2, 0).unwrap(), ["a"]);
        assert_eq!(report.removed, 2);
        assert_eq!(report.visited, 3);

        let mut solver = TileCollapse::with_seed(3, 1, 7).unwrap();
        solver
            .add_prototypes([
                Prototype::new("a", Sides::parse("0s", "0s", "0s", "0s"))
                    .with_antisockets(Sides::parse("", "xs", "", "")),
                Prototype::new("b", Sides::parse("0s", "0s", "0s", "0s"))
                    .with_antisockets(Sides::parse("xs", "", "", "")),
            ])
            .unwrap();
        solver.set(2, 0, &["b"]).unwrap();
        assert_eq!(solver.domain_ids(1, 0).unwrap(), ["b"]);
        assert!(solver.solve().unwrap());
        assert_eq!(solver.results(), vec![Some("b".to_string()); 3]);
    }

    // A flip chain lets "aff" face "af"
    #[test]
    fn test_flip_chain_neighbour_survives() {
        let mut solver = TileCollapse::with_seed(2, 1, 7).unwrap();
        solver
            .add_prototypes([
                Prototype::new("P", Sides::parse("0s", "af", "0s", "0s")),
                Prototype::new("Q", Sides::parse("aff", "0s", "0s", "0s")),
            ])
            .unwrap();

        solver.set(0, 0, &["P"]).unwrap();
        assert_eq!(solver.domain_ids(1, 0).unwrap(), ["Q"]);
        assert!(solver.solve().unwrap());
        assert_eq!(solver.results(), [Some("P".to_string()), Some("Q".to_string())]);
    }

    #[test]
    fn test_out_of_bounds_seed() {
        let mut registry = PrototypeRegistry::new();
        registry.add(stripes()).unwrap();
        let mut grid = DomainGrid::new(2, 2, &registry.full_domain()).unwrap();
        assert!(matches!(
            propagate(&mut grid, &registry, 5, 0),
            Err(TileError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_worklist_deduplicates() {
        let registry = PrototypeRegistry::new();
        let grid = DomainGrid::new(3, 3, &registry.full_domain()).unwrap();
        let mut worklist = Worklist::new(&grid);
        worklist.push(1, 2);
        worklist.push(1, 2);
        worklist.push(0, 0);
        assert_eq!(worklist.len(), 2);
        assert_eq!(worklist.take_next(), Some((1, 2)));
        worklist.push(1, 2);
        assert_eq!(worklist.len(), 2);
        assert_eq!(worklist.take_next(), Some((0, 0)));
        assert_eq!(worklist.take_next(), Some((1, 2)));
        assert!(worklist.is_empty());
    }
}
