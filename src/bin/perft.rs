use anyhow::{Context, Result};
use clap::Parser;
use isobot::board::{Board, Player};
use isobot::movegen::legal_full_moves;
use isobot::perft::{perft, perft_copy};
use rayon::prelude::*;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Count full-move sequences from a position")]
struct Args {
    /// Search depth in plies
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// Board in compact form (e.g. "1.../..../..../...2") or "corners:N"
    #[arg(value_name = "BOARD", default_value = "corners:4")]
    board: String,
    /// Player to move (1 or 2)
    #[arg(long, default_value_t = 1)]
    mover: u8,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Also count with per-node copies and check both agree
    #[arg(long, default_value_t = false)]
    verify: bool,
}

fn parse_board(s: &str) -> Result<Board> {
    if let Some(n) = s.strip_prefix("corners:") {
        let size: usize = n.parse().with_context(|| format!("invalid size '{}'", n))?;
        return Ok(Board::corners(size)?);
    }
    Ok(s.parse::<Board>()?)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let board = parse_board(&args.board)?;
    let mover = Player::from_id(args.mover).context("mover must be 1 or 2")?;
    let depth = args.depth;

    let t0 = Instant::now();
    let nodes = if args.threads <= 1 || depth <= 1 {
        let mut b = board.clone();
        perft(&mut b, mover, depth)
    } else {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads).build()?;
        pool.install(|| {
            legal_full_moves(&board, mover)
                .par_iter()
                .map(|&m| {
                    let mut b = board.clone();
                    b.make(mover, m);
                    perft(&mut b, mover.opponent(), depth - 1)
                })
                .sum::<u64>()
        })
    };
    let dt = t0.elapsed().as_secs_f64();
    let nps = if dt > 0.0 { nodes as f64 / dt } else { 0.0 };
    println!("nodes: {} elapsed: {:.3}s nps: {:.0}", nodes, dt, nps);

    if args.verify {
        let copied = perft_copy(&board, mover, depth);
        if copied != nodes {
            anyhow::bail!("make/unmake count {} differs from copy count {}", nodes, copied);
        }
        println!("copy-based count agrees");
    }
    Ok(())
}
