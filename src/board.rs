use crate::{
    random_cells, Bounds, CellSet, Coord, DenseEngine, GoLEngine, QuadTreeEngine, Representation,
    RuleTable, SparseEngine, Warning,
};
use anyhow::{anyhow, Result};

/// Largest side of a quadtree board.
const MAX_QUADTREE_SIDE: u32 = 1 << 31;

/// Everything needed to build a [`Board`].
///
/// # Example
///
/// ```rust
/// use gol_boards::{Board, BoardConfig, Coord, Representation};
///
/// let config = BoardConfig::new(8, 8)
///     .with_cells(vec![Coord::new(3, 4), Coord::new(4, 4), Coord::new(5, 4)])
///     .with_representation(Representation::QuadTree)
///     .with_rule("B3/S23");
/// let mut board = Board::new(&config).unwrap();
/// assert!(board.step());
/// assert_eq!(
///     board.sorted_cells(),
///     vec![Coord::new(4, 3), Coord::new(4, 4), Coord::new(4, 5)]
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub width: u32,
    pub height: u32,
    /// Initial live cells; if empty, the board is seeded randomly.
    pub cells: Vec<Coord>,
    pub representation: Representation,
    /// Name of a catalog rule such as `"B3/S23"`.
    pub rule: String,
    /// Seed of the random fill, OS entropy if `None`.
    pub seed: Option<u64>,
}

impl BoardConfig {
    /// Configuration of a randomly seeded B3/S23 board with the default
    /// representation.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: Vec::new(),
            representation: Representation::default(),
            rule: RuleTable::CONWAY.to_string(),
            seed: None,
        }
    }

    pub fn with_cells(mut self, cells: Vec<Coord>) -> Self {
        self.cells = cells;
        self
    }

    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.representation = representation;
        self
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = rule.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A bounded Game of Life board.
///
/// The board owns one engine chosen by [`Representation`] and exposes the
/// same observable behavior whichever it is.
pub struct Board {
    bounds: Bounds,
    rules: RuleTable,
    representation: Representation,
    engine: Box<dyn GoLEngine>,
    warnings: Vec<Warning>,
    generation: u64,
}

impl Board {
    /// Builds a board from `config`.
    ///
    /// An unknown rule name and a non-square quadtree board are reported as
    /// [`Warning`]s and do not fail the construction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `width` or `height` is zero
    /// - a quadtree board is wider or taller than `2^31`
    /// - an initial cell lies outside of the board or is listed twice
    pub fn new(config: &BoardConfig) -> Result<Self> {
        let bounds = Bounds::new(config.width, config.height);
        if bounds.width == 0 || bounds.height == 0 {
            return Err(anyhow!(
                "Board must not be empty, got {}x{}",
                bounds.width,
                bounds.height
            ));
        }

        let (rules, rule_warning) = RuleTable::resolve(&config.rule);
        let mut warnings = rule_warning.into_iter().collect::<Vec<_>>();

        let engine: Box<dyn GoLEngine> = match config.representation {
            Representation::Dense => Box::new(DenseEngine::new(bounds, rules)),
            Representation::Sparse => Box::new(SparseEngine::new(bounds, rules)),
            Representation::QuadTree => {
                let longest = bounds.width.max(bounds.height);
                if longest > MAX_QUADTREE_SIDE {
                    return Err(anyhow!(
                        "Quadtree board {}x{} is too large, sides up to {} are supported",
                        bounds.width,
                        bounds.height,
                        MAX_QUADTREE_SIDE
                    ));
                }
                if bounds.width != bounds.height {
                    let warning = Warning::NonSquareQuadTree {
                        width: bounds.width,
                        height: bounds.height,
                        side: u64::from(longest).next_power_of_two(),
                    };
                    log::warn!("{warning}");
                    warnings.push(warning);
                }
                Box::new(QuadTreeEngine::new(bounds, rules))
            }
        };

        let mut board = Self {
            bounds,
            rules,
            representation: config.representation,
            engine,
            warnings,
            generation: 0,
        };
        if config.cells.is_empty() {
            board
                .engine
                .load_cells(&random_cells(bounds, config.seed))?;
        } else {
            board.engine.load_cells(&config.cells)?;
        }

        log::debug!(
            "{}x{} {} board, rule {}, {} live cells",
            bounds.width,
            bounds.height,
            board.representation,
            rules,
            board.population()
        );
        Ok(board)
    }

    /// Advances the board by one generation and returns whether any cell is
    /// still alive.
    pub fn step(&mut self) -> bool {
        self.generation += 1;
        self.engine.update()
    }

    /// Steps until the board dies out or `max_steps` generations have been
    /// computed. Returns the number of steps after which the board was still
    /// alive.
    pub fn run(&mut self, max_steps: u64) -> u64 {
        let mut count = 0;
        while count < max_steps && self.step() {
            count += 1;
        }
        count
    }

    /// Current live cells, in no particular order.
    pub fn living_cells(&self) -> CellSet {
        self.engine.living_cells()
    }

    /// Current live cells in row-major order.
    pub fn sorted_cells(&self) -> Vec<Coord> {
        let mut cells = self.engine.living_cells().into_iter().collect::<Vec<_>>();
        cells.sort_unstable();
        cells
    }

    /// Whether the cell at `(x, y)` is alive; `false` outside of the board.
    pub fn is_alive(&self, x: u32, y: u32) -> bool {
        self.engine.is_alive(Coord::new(x, y))
    }

    pub fn population(&self) -> usize {
        self.engine.population()
    }

    /// Number of steps taken so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Rule in effect, after any fallback.
    pub fn rules(&self) -> RuleTable {
        self.rules
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// Problems reported while the board was built.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Approximate heap memory used by the representation.
    pub fn bytes_total(&self) -> usize {
        self.engine.bytes_total()
    }
}
