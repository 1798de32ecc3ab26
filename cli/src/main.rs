use std::io::{BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use cubesweeper_core::{CellCount, Coord, GridConfig, GridEngine, MAX_AXIS};

use crate::command::{Command, HELP};
use crate::session::{Flow, Session};

mod command;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "3D minesweeper on a voxel grid", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Grid width
    #[arg(short = 'x', long, default_value_t = 7, value_parser = axis_parser())]
    size_x: Coord,

    /// Grid height
    #[arg(short = 'y', long, default_value_t = 7, value_parser = axis_parser())]
    size_y: Coord,

    /// Grid depth
    #[arg(short = 'z', long, default_value_t = 7, value_parser = axis_parser())]
    size_z: Coord,

    /// Mine count, defaults to a tenth of the grid
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print frame snapshots as JSON lines instead of text layers
    #[arg(long)]
    json: bool,
}

fn axis_parser() -> clap::builder::RangedI64ValueParser<Coord> {
    clap::value_parser!(Coord).range(1..=i64::from(MAX_AXIS))
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let size = (args.size_x, args.size_y, args.size_z);
    let config = match args.mines {
        Some(mines) => GridConfig::new(size, mines),
        None => GridConfig::default().with_size(size),
    }
    .context("Could not configure grid")?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let mut session = Session::new(GridEngine::new(config, seed), args.json);
    let interactive = std::io::stdin().is_terminal();
    let mut stdout = std::io::stdout().lock();

    if interactive {
        writeln!(stdout, "{HELP}")?;
    }
    session.execute(Command::Show, &mut stdout)?;

    for line in std::io::stdin().lock().lines() {
        let line = line.context("Could not read command")?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                if session.execute(command, &mut stdout)? == Flow::Quit {
                    break;
                }
            }
            Err(err) => writeln!(stdout, "{err}")?,
        }
        stdout.flush()?;
    }

    log::debug!("Session ended in state {:?}", session.engine().state());
    Ok(())
}
