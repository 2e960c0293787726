mod report;
mod runner;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use playforge_game::GameDesign;

use report::{print_console, print_json};
use runner::{aggregate, run_playthrough};

const SAMPLE_DESIGN_JSON: &str =
    include_str!("../../playforge-web/static/assets/data/sample_design.json");

#[derive(Debug, Parser)]
#[command(name = "playforge-tester", version)]
#[command(about = "Headless playability testing for Playforge designs - seeded batch playthroughs")]
struct Args {
    /// Path to a design JSON file (embedded sample design when omitted)
    #[arg(long)]
    design: Option<PathBuf>,

    /// Number of playthroughs to run
    #[arg(long, default_value_t = 1000)]
    games: u64,

    /// Base seed; game N runs with seed + N
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,
}

fn load_design(path: Option<&PathBuf>) -> Result<GameDesign> {
    let json = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading design file {}", path.display()))?,
        None => SAMPLE_DESIGN_JSON.to_string(),
    };
    GameDesign::from_json(&json).context("parsing design JSON")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let design = load_design(args.design.as_ref())?;
    log::info!(
        "running {} playthroughs of \"{}\" from seed {}",
        args.games,
        design.title,
        args.seed
    );

    let records: Vec<_> = (0..args.games)
        .map(|offset| run_playthrough(&design, args.seed.wrapping_add(offset)))
        .collect();
    let summary = aggregate(&records);

    match args.report.as_str() {
        "json" => print_json(&summary)?,
        _ => print_console(&design, &summary),
    }
    Ok(())
}
