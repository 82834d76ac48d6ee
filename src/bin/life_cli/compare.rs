use crate::util::{format_count, local_time, print_warnings};
use anyhow::{ensure, Result};
use clap::Args;
use gol_boards::{Board, BoardConfig, Representation};

#[derive(Args, Debug)]
pub(super) struct CompareArgs {
    /// Side lengths of the square boards to compare
    #[arg(short, long, num_args = 1.., default_values_t = [16, 64, 256])]
    sizes: Vec<u32>,

    /// Rule variant
    #[arg(short, long, default_value = "B3/S23")]
    rule: String,

    /// Number of generations per board
    #[arg(short, long, default_value_t = 50)]
    iterations: u64,

    /// Seed of the random initial pattern
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

pub(super) fn run_compare(args: CompareArgs) -> Result<()> {
    println!("Started at {}", local_time());
    for &size in &args.sizes {
        println!("{size}x{size}, rule {}, {} generations:", args.rule, args.iterations);

        let mut finals = Vec::new();
        for representation in Representation::ALL {
            let config = BoardConfig::new(size, size)
                .with_representation(representation)
                .with_rule(args.rule.as_str())
                .with_seed(args.seed);
            let mut board = Board::new(&config)?;
            if finals.is_empty() {
                print_warnings(&board);
            }

            let timer = std::time::Instant::now();
            let steps = board.run(args.iterations);
            let secs = timer.elapsed().as_secs_f64();
            println!(
                "  {:>8}: {:>9.3} ms, {:>4} live steps, {:>12} bytes, population {}",
                representation.name(),
                secs * 1e3,
                steps,
                format_count(board.bytes_total()),
                format_count(board.population()),
            );
            finals.push((representation, board.sorted_cells()));
        }

        let (reference, expected) = &finals[0];
        for (representation, cells) in &finals[1..] {
            ensure!(
                cells == expected,
                "{} and {} boards diverged on {}x{}",
                representation,
                reference,
                size,
                size
            );
        }
    }
    Ok(())
}
