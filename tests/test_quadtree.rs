#[cfg(test)]
mod tests {
    use gol_boards::*;
    use rand::{Rng, SeedableRng};

    const SEED: u64 = 42;

    fn random_points(rng: &mut impl Rng, side: u32, count: usize) -> Vec<Coord> {
        (0..count)
            .map(|_| Coord::new(rng.random_range(0..side), rng.random_range(0..side)))
            .collect()
    }

    #[test]
    fn test_insert_then_contains() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(SEED);
        let mut tree = QuadTree::new(6).unwrap();
        let mut expected = CellSet::new();
        for pos in random_points(&mut rng, 64, 500) {
            let outcome = tree.insert(pos);
            if expected.insert(pos) {
                assert_eq!(outcome, Insertion::Inserted);
            } else {
                assert_eq!(outcome, Insertion::AlreadyPresent);
            }
            assert!(tree.contains(pos));
        }
        assert_eq!(tree.len(), expected.len());
        assert_eq!(tree.traverse().cells, expected);
        tree.check_integrity().unwrap();
    }

    #[test]
    fn test_remove_then_absent() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(SEED);
        let mut tree = QuadTree::new(5).unwrap();
        let points = random_points(&mut rng, 32, 300);
        for &pos in &points {
            tree.insert(pos);
        }

        let mut expected = tree.traverse().cells;
        for &pos in points.iter().rev() {
            let outcome = tree.remove(pos);
            if expected.remove(&pos) {
                assert_eq!(outcome, Removal::Removed);
            } else {
                assert_eq!(outcome, Removal::NotFound);
            }
            assert!(!tree.contains(pos));
            tree.check_integrity().unwrap();
        }
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_double_insert_keeps_traversal() {
        let mut tree = QuadTree::new(4).unwrap();
        for (x, y) in [(0, 0), (15, 15), (7, 8), (8, 7)] {
            tree.insert(Coord::new(x, y));
        }
        let before = tree.traverse();
        let nodes = tree.node_count();

        for (x, y) in [(0, 0), (15, 15), (7, 8), (8, 7)] {
            assert_eq!(tree.insert(Coord::new(x, y)), Insertion::AlreadyPresent);
        }
        let after = tree.traverse();
        assert_eq!(after.cells, before.cells);
        assert_eq!(after.max_depth, before.max_depth);
        assert_eq!(after.nodes, before.nodes);
        assert_eq!(tree.node_count(), nodes);
    }

    #[test]
    fn test_traversal_is_fresh() {
        let mut tree = QuadTree::new(3).unwrap();
        tree.insert(Coord::new(1, 6));
        let first = tree.traverse();
        tree.insert(Coord::new(6, 1));
        tree.remove(Coord::new(1, 6));
        let second = tree.traverse();

        assert_eq!(first.cells.len(), 1);
        assert!(first.cells.contains(&Coord::new(1, 6)));
        assert_eq!(second.cells.len(), 1);
        assert!(second.cells.contains(&Coord::new(6, 1)));
        assert_eq!(second.max_depth, 3);
    }

    #[test]
    fn test_deferred_matches_eager() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(SEED);
        let mut eager = QuadTree::new(5).unwrap();
        let mut deferred = QuadTree::new(5)
            .unwrap()
            .with_policy(PrunePolicy::Deferred);

        for _ in 0..2000 {
            let pos = Coord::new(rng.random_range(0..32), rng.random_range(0..32));
            if rng.random_bool(0.5) {
                assert_eq!(eager.insert(pos), deferred.insert(pos));
            } else {
                assert_eq!(eager.remove(pos), deferred.remove(pos));
            }
            assert_eq!(eager.contains(pos), deferred.contains(pos));
        }
        assert_eq!(eager.traverse().cells, deferred.traverse().cells);
        assert!(deferred.node_count() >= eager.node_count());
        eager.check_integrity().unwrap();
        deferred.check_integrity().unwrap();

        assert_eq!(deferred.prune(), eager.len());
        assert_eq!(deferred.node_count(), eager.node_count());
        deferred.check_integrity().unwrap();
    }

    #[test]
    fn test_out_of_region() {
        let mut tree = QuadTree::covering(Bounds::new(5, 3)).unwrap();
        assert_eq!(tree.region(), Region::new(0, 0, 7, 7));
        assert_eq!(tree.insert(Coord::new(8, 0)), Insertion::OutOfRegion);
        assert_eq!(tree.insert(Coord::new(u32::MAX, u32::MAX)), Insertion::OutOfRegion);
        assert_eq!(tree.remove(Coord::new(0, 8)), Removal::NotFound);
        assert!(tree.is_empty());
        tree.check_integrity().unwrap();
    }
}
