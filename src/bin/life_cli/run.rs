use crate::util::{local_time, print_population, print_warnings, render, Storage};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use gol_boards::{parse_rle, Board, BoardConfig, Bounds, Preset};

#[derive(Args, Debug)]
pub(super) struct RunArgs {
    /// Width of the board
    #[arg(short = 'x', long, default_value_t = 100)]
    width: u32,

    /// Height of the board
    #[arg(short = 'y', long, default_value_t = 100)]
    height: u32,

    /// How the board stores its cells
    #[arg(short, long, value_enum, default_value_t = Storage::Sparse)]
    storage: Storage,

    /// Rule variant, one of B3/S23, B6/S16, B1/S12, B36/S23, B2/S3, B2/S;
    /// the rule of the RLE file is used if omitted
    #[arg(short, long)]
    rule: Option<String>,

    /// Initial pattern: block, beehive, blinker, toad, glider,
    /// lightweight_spaceship, glider_gun or sierpinski; random if omitted
    #[arg(short, long, conflicts_with = "file")]
    preset: Option<Preset>,

    /// Path to an RLE file with the initial pattern, placed at the top-left corner
    #[arg(short, long)]
    file: Option<String>,

    /// Seed of the random initial pattern
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of generations
    #[arg(short, long, default_value_t = 100)]
    iterations: u64,

    /// Print the board after every generation
    #[arg(long)]
    print: bool,
}

pub(super) fn run_board(args: RunArgs) -> Result<()> {
    let bounds = Bounds::new(args.width, args.height);
    let mut config =
        BoardConfig::new(args.width, args.height).with_representation(args.storage.into());
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut rule = args.rule;
    if let Some(preset) = args.preset {
        config = config.with_cells(preset.cells(bounds)?);
    } else if let Some(path) = &args.file {
        let data = std::fs::read(path).with_context(|| format!("Failed to read {path}"))?;
        let pattern = parse_rle(&data).with_context(|| format!("Failed to parse {path}"))?;
        if pattern.width > args.width || pattern.height > args.height {
            return Err(anyhow!(
                "Pattern {}x{} does not fit into the {}x{} board",
                pattern.width,
                pattern.height,
                args.width,
                args.height
            ));
        }
        if pattern.cells.is_empty() {
            return Err(anyhow!("Pattern {path} has no live cells"));
        }
        rule = rule.or(pattern.rule);
        config = config.with_cells(pattern.cells);
    }
    if let Some(rule) = rule {
        config = config.with_rule(rule);
    }

    println!("Started at {}", local_time());
    let mut board = Board::new(&config)?;
    print_warnings(&board);
    println!(
        "{}x{} {} board, rule {}",
        board.width(),
        board.height(),
        board.representation(),
        board.rules()
    );
    print_population(&board);

    let timer = std::time::Instant::now();
    let mut count = 0;
    if args.print {
        print!("{}", render(&board));
    }
    while count < args.iterations && board.step() {
        count += 1;
        if args.print {
            println!();
            print!("{}", render(&board));
        }
    }
    println!(
        "Finished after {} iterations in {:.3} secs",
        count,
        timer.elapsed().as_secs_f64()
    );
    print_population(&board);
    Ok(())
}
