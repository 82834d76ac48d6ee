use chrono::Local;
use clap::ValueEnum;
use gol_boards::{Board, Representation};
use num_format::{CustomFormat, Grouping, ToFormattedString};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(super) enum Storage {
    /// Every cell of the grid, rescanned each generation
    Dense,
    /// Hash set of live cells
    Sparse,
    /// Live cells as leaves of a region quadtree
    Quadtree,
}

impl From<Storage> for Representation {
    fn from(storage: Storage) -> Self {
        match storage {
            Storage::Dense => Representation::Dense,
            Storage::Sparse => Representation::Sparse,
            Storage::Quadtree => Representation::QuadTree,
        }
    }
}

pub(super) fn format_count(n: usize) -> String {
    let fmt = CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator("_")
        .build()
        .unwrap();
    n.to_formatted_string(&fmt)
}

pub(super) fn print_population(board: &Board) {
    println!("Population: {}", format_count(board.population()));
}

pub(super) fn print_warnings(board: &Board) {
    for warning in board.warnings() {
        eprintln!("Warning: {warning}");
    }
}

/// Renders the board as rows of `X` (alive) and `.` (dead).
pub(super) fn render(board: &Board) -> String {
    let mut text = String::with_capacity((board.width() as usize + 1) * board.height() as usize);
    for y in 0..board.height() {
        for x in 0..board.width() {
            text.push(if board.is_alive(x, y) { 'X' } else { '.' });
        }
        text.push('\n');
    }
    text
}

pub(super) fn local_time() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}
