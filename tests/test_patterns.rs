#[cfg(test)]
mod tests {
    use gol_boards::*;

    fn coords(list: &[(u32, u32)]) -> Vec<Coord> {
        let mut cells = list.iter().map(|&p| Coord::from(p)).collect::<Vec<_>>();
        cells.sort();
        cells
    }

    fn build_boards(size: u32, rule: &str, cells: &[(u32, u32)]) -> Vec<Board> {
        Representation::ALL
            .into_iter()
            .map(|representation| {
                let config = BoardConfig::new(size, size)
                    .with_cells(coords(cells))
                    .with_representation(representation)
                    .with_rule(rule);
                Board::new(&config).unwrap()
            })
            .collect()
    }

    fn assert_phases(boards: &mut [Board], phases: &[&[(u32, u32)]], generations: usize) {
        for generation in 0..generations {
            let expected = coords(phases[generation % phases.len()]);
            for board in boards.iter_mut() {
                assert_eq!(
                    board.sorted_cells(),
                    expected,
                    "{} board, generation {}",
                    board.representation(),
                    generation
                );
                assert!(board.step());
            }
        }
    }

    #[test]
    fn test_block_is_still() {
        const BLOCK: &[(u32, u32)] = &[(2, 2), (2, 3), (3, 2), (3, 3)];
        let mut boards = build_boards(4, "B3/S23", BLOCK);
        assert_phases(&mut boards, &[BLOCK], 10);
    }

    #[test]
    fn test_beehive_is_still() {
        const BEEHIVE: &[(u32, u32)] = &[(2, 3), (2, 4), (3, 2), (3, 5), (4, 3), (4, 4)];
        let mut boards = build_boards(6, "B3/S23", BEEHIVE);
        assert_phases(&mut boards, &[BEEHIVE], 10);
    }

    #[test]
    fn test_blinker_oscillates() {
        const HORIZONTAL: &[(u32, u32)] = &[(1, 2), (2, 2), (3, 2)];
        const VERTICAL: &[(u32, u32)] = &[(2, 1), (2, 2), (2, 3)];
        let mut boards = build_boards(4, "B3/S23", HORIZONTAL);
        assert_phases(&mut boards, &[HORIZONTAL, VERTICAL], 10);
    }

    #[test]
    fn test_toad_oscillates() {
        const TOAD: &[(u32, u32)] = &[(3, 3), (3, 4), (3, 5), (4, 2), (4, 3), (4, 4)];
        const PHASE: &[(u32, u32)] = &[(2, 4), (3, 2), (3, 5), (4, 2), (4, 5), (5, 3)];
        let mut boards = build_boards(6, "B3/S23", TOAD);
        assert_phases(&mut boards, &[TOAD, PHASE], 10);
    }

    #[test]
    fn test_corner_cell() {
        // under B1/S12 a corner cell sees three neighbors and nothing beyond the edge
        let mut boards = build_boards(5, "B1/S12", &[(0, 0)]);
        for board in boards.iter_mut() {
            assert!(board.step());
            assert_eq!(board.sorted_cells(), coords(&[(1, 0), (0, 1), (1, 1)]));
        }
    }

    #[test]
    fn test_get_living() {
        let cells = [(1, 1), (2, 4), (3, 1), (4, 3)];
        for board in build_boards(5, "B3/S23", &cells) {
            assert_eq!(board.sorted_cells(), coords(&cells));
            assert_eq!(board.living_cells().len(), 4);
        }
    }

    #[test]
    fn test_is_alive() {
        let cells = [(1, 3), (3, 6), (5, 5), (7, 2), (9, 6)];
        for board in build_boards(10, "B3/S23", &cells) {
            for y in 0..12 {
                for x in 0..12 {
                    assert_eq!(board.is_alive(x, y), cells.contains(&(x, y)), "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_glider_reaches_corner() {
        // a glider travels one cell diagonally every four generations until it
        // jams against the bottom-right corner and turns into a block
        let size = 12;
        let cells = Preset::Glider.cells(Bounds::new(size, size)).unwrap();
        for representation in Representation::ALL {
            let config = BoardConfig::new(size, size)
                .with_cells(cells.clone())
                .with_representation(representation);
            let mut board = Board::new(&config).unwrap();
            board.run(4);
            let moved = cells
                .iter()
                .map(|pos| Coord::new(pos.x + 1, pos.y + 1))
                .collect::<CellSet>();
            assert_eq!(board.living_cells(), moved, "{representation}");

            board.run(100);
            assert_eq!(board.sorted_cells(), coords(&[(10, 10), (11, 10), (10, 11), (11, 11)]));
        }
    }

    #[test]
    fn test_seeds_from_single_cell() {
        // B2/S: a lone cell has no neighbors and dies immediately
        for mut board in build_boards(7, "B2/S", &[(3, 3)]) {
            assert!(!board.step());
            assert!(board.living_cells().is_empty());
        }
    }

    #[test]
    fn test_rle_pattern_on_board() {
        let rle = parse_rle(b"#C blinker\nx = 3, y = 1, rule = B3/S23\n3o!").unwrap();
        let rule = rle.rule.clone().unwrap();
        for representation in Representation::ALL {
            let config = BoardConfig::new(5, 5)
                .with_cells(rle.shifted(1, 2).unwrap())
                .with_representation(representation)
                .with_rule(rule.as_str());
            let mut board = Board::new(&config).unwrap();
            assert!(board.warnings().is_empty());
            board.step();
            assert_eq!(board.sorted_cells(), coords(&[(2, 1), (2, 2), (2, 3)]));
        }
    }
}
