use anyhow::{Context, Result};
use clap::Parser;
use isobot::board::{Action, Board, Placement, Player, Pos};
use isobot::game::{Frontend, Game, GameConfig, Headless, Phase};
use isobot::search::{CacheScope, SearchParams};
use isobot::strategy::{Strategy, StrategyKind};
use std::io::{self, BufRead, Write};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play the move-and-block game in the terminal", long_about = None)]
struct Args {
    /// Board size (N for an N x N board)
    #[arg(long, default_value_t = 4)]
    size: usize,

    /// Player 1: human, random or minimax
    #[arg(long, default_value = "human")]
    player1: String,

    /// Player 2: human, random or minimax
    #[arg(long, default_value = "minimax")]
    player2: String,

    /// Place both tokens on random distinct cells instead of opposite corners
    #[arg(long)]
    random_start: bool,

    /// Search depth for minimax players
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// Optional per-move time limit for minimax players, in milliseconds
    #[arg(long)]
    movetime_ms: Option<u64>,

    /// Keep the evaluation cache across moves of a game
    #[arg(long)]
    keep_cache: bool,

    /// Seed for random players and random starts
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of games to play back to back without rendering (0 = one rendered game)
    #[arg(long, default_value_t = 0)]
    games: usize,
}

struct Terminal {
    lines: io::Lines<io::StdinLock<'static>>,
}

impl Terminal {
    fn new() -> Self { Self { lines: io::stdin().lock().lines() } }
}

impl Frontend for Terminal {
    fn on_start(&mut self, board: &Board) {
        println!("\n{}", board);
    }

    fn on_move(&mut self, board: &Board, player: Player, action: Action) {
        println!("\n{} plays {}", player, action);
        println!("{}", board);
    }

    fn on_end(&mut self, _board: &Board, winner: Player) {
        println!("{} wins!", winner);
    }

    fn pick(&mut self, board: &Board, player: Player, phase: Phase) -> Option<Pos> {
        loop {
            match phase {
                Phase::Relocation => print!("{}, move to (row col): ", player),
                Phase::Block => {
                    println!("{}", board);
                    print!("{}, block (row col): ", player)
                }
            }
            io::stdout().flush().ok()?;
            let line = self.lines.next()?.ok()?;
            let input = line.trim();
            if input == "quit" { return None; }
            match input.parse::<Pos>() {
                Ok(p) => return Some(p),
                Err(e) => println!("{}", e),
            }
        }
    }

    fn rejected(&mut self, pos: Pos, phase: Phase) {
        match phase {
            Phase::Relocation => println!("Cannot move to {}: pick an empty neighbouring cell.", pos),
            Phase::Block => println!("Cannot block {}: pick an empty cell.", pos),
        }
    }
}

fn build(args: &Args, name: &str, seed: u64) -> Result<Strategy> {
    let params = SearchParams {
        depth: args.depth,
        movetime: args.movetime_ms.map(Duration::from_millis),
        cache_scope: if args.keep_cache { CacheScope::PerGame } else { CacheScope::PerDecision },
        ..Default::default()
    };
    let kind: StrategyKind = name.parse().with_context(|| format!("invalid player type '{}'", name))?;
    Ok(Strategy::new(kind, params, seed)?)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let placement = if args.random_start { Placement::Random } else { Placement::Corners };

    if args.games > 0 {
        for i in 0..args.games {
            let seed = args.seed.wrapping_add(i as u64);
            let config = GameConfig { size: args.size, placement, seed };
            let p1 = build(&args, &args.player1, seed ^ 1)?;
            let p2 = build(&args, &args.player2, seed ^ 2)?;
            if p1.is_interactive() || p2.is_interactive() {
                anyhow::bail!("human players need the rendered mode (omit --games)");
            }
            let record = Game::new(&config, p1, p2)?.play(&mut Headless)?;
            println!("Game {}: {} wins after {} plies", i, record.winner, record.plies());
        }
        return Ok(());
    }

    let config = GameConfig { size: args.size, placement, seed: args.seed };
    let p1 = build(&args, &args.player1, args.seed ^ 1)?;
    let p2 = build(&args, &args.player2, args.seed ^ 2)?;
    let game = Game::new(&config, p1, p2).context("setting up the game")?;
    match game.play(&mut Terminal::new()) {
        Ok(_) => Ok(()),
        Err(isobot::game::GameError::Abandoned { player }) => {
            println!("{} quit.", player);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
