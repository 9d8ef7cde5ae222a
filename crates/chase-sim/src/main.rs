//! chase-sim: a hunter pack chasing a wandering agent on the classic maze.
//!
//! ```text
//! chase-sim [PACK_CONFIG.json] [TICKS]
//! ```
//!
//! Set `RUST_LOG=info` for summaries, `RUST_LOG=debug` for every replan.

mod session;
mod walker;

use std::error::Error;
use std::{env, fs};

use chase_core::Maze;
use chase_hunt::PackConfig;
use tracing::info;

use session::Session;

const TILE_SIZE: i32 = 16;
const DEFAULT_TICKS: u64 = 3600;
const SUMMARY_EVERY: u64 = 600;

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(&path)?,
        None => PackConfig::classic(),
    };
    let ticks: u64 = match args.next() {
        Some(n) => n.parse()?,
        None => DEFAULT_TICKS,
    };

    let maze = Maze::classic(TILE_SIZE)?;
    let mut session = Session::new(maze, &config)?;
    session.run(ticks, SUMMARY_EVERY);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_config(path: &str) -> Result<PackConfig, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let config: PackConfig = serde_json::from_str(&text)?;
    info!(path, hunters = config.hunters.len(), "loaded pack config");
    Ok(config)
}
