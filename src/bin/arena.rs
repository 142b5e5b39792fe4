use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use isobot::arena::{evaluate_strategies, ArenaParams, Verdict};
use isobot::board::Placement;
use isobot::strategy::StrategyKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "isobot-arena", about = "Pit two strategies against each other over many games")]
struct Args {
    /// First strategy: random or minimax
    #[arg(long, default_value = "minimax")]
    first: String,
    /// Second strategy: random or minimax
    #[arg(long, default_value = "random")]
    second: String,
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 4)]
    size: usize,
    /// Search depth for minimax strategies
    #[arg(long, default_value_t = 3)]
    depth: u32,
    /// corners or random
    #[arg(long, default_value = "corners")]
    placement: String,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Worker threads (games run in parallel)
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Write the full report as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let a = Args::parse();
    let first: StrategyKind = a.first.parse()?;
    let second: StrategyKind = a.second.parse()?;
    let placement: Placement = a.placement.parse()?;
    let params = ArenaParams {
        first,
        second,
        games: a.games,
        size: a.size,
        placement,
        depth: a.depth,
        seed: a.seed,
    };

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}] {msg}")
            .context("progress template")?,
    );
    let pool = rayon::ThreadPoolBuilder::new().num_threads(a.threads.max(1)).build()?;
    let report = pool.install(|| {
        evaluate_strategies(&params, |g| {
            pb.set_message(format!("last: {} won", g.winner));
            pb.inc(1);
        })
    })?;
    pb.finish_and_clear();

    for g in &report.games {
        let name = if g.first_won { first } else { second };
        println!("Game {}: winner {} ({})", g.index, name, g.winner);
    }
    println!("=> {} (first) wins: {}", first, report.first_wins);
    println!("=> {} (second) wins: {}", second, report.second_wins);
    match report.verdict {
        Verdict::First => println!("-> {} (first) is the superior strategy.", first),
        Verdict::Second => println!("-> {} (second) is the superior strategy.", second),
        Verdict::Tie => println!("-> Both strategies are equally effective."),
    }

    if let Some(path) = a.json {
        let body = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        eprintln!("Wrote report to {}", path.display());
    }
    Ok(())
}
