use anyhow::{Context, Result};
use boardcheck::session::{MoveReport, Session};
use boardcheck::{Board, Color, MoveLog};
use clap::Parser;
use rayon::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay submitted board snapshots through the rules engine", long_about = None)]
struct Args {
    /// JSON game files: {"start": <board>?, "to_move": "white"?, "moves": [<board>, ...]}
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format: 'json' (one report per line) or 'text'
    #[arg(long, default_value = "json")]
    format: String,

    /// Stop replaying a game at its first rejected board
    #[arg(long)]
    stop_on_reject: bool,

    /// Number of games replayed in parallel
    #[arg(long, default_value_t = 1)]
    threads: usize,
}

#[derive(Debug, Deserialize)]
struct GameFile {
    #[serde(default)]
    start: Option<Board>,
    #[serde(default)]
    to_move: Option<Color>,
    moves: Vec<Board>,
}

fn replay(path: &Path, stop_on_reject: bool) -> Result<Vec<MoveReport>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let game: GameFile = serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    let mut session = Session::from_position(
        game.start.unwrap_or_else(Board::initial),
        game.to_move.unwrap_or(Color::White),
        MoveLog::new(),
    );
    let mut reports = Vec::with_capacity(game.moves.len());
    for proposed in &game.moves {
        let report = session.submit_report(proposed);
        let rejected = !report.legal;
        reports.push(report);
        if rejected && stop_on_reject { break; }
    }
    log::info!("{}: {} boards, {} accepted", path.display(), reports.len(), session.log().len());
    Ok(reports)
}

fn print_text(path: &Path, r: &MoveReport) {
    match (&r.verdict, &r.error) {
        (Some(v), _) => {
            let mut flags = String::new();
            if v.opponent_in_checkmate { flags.push_str(" mate"); } else if v.opponent_in_check { flags.push_str(" check"); }
            if let Some(side) = v.castle_side { flags.push_str(&format!(" castle-{side:?}").to_lowercase()); }
            if v.is_en_passant { flags.push_str(" e.p."); }
            println!("{} #{} {:?} {}{} ok{}", path.display(), r.ply, r.mover, v.origin, v.destination, flags);
        }
        (None, Some(e)) => println!("{} #{} {:?} rejected: {}", path.display(), r.ply, r.mover, e),
        (None, None) => {}
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let text = match args.format.to_lowercase().as_str() {
        "json" => false,
        "text" => true,
        other => anyhow::bail!("Invalid format '{other}': use 'json' or 'text'"),
    };

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build().context("thread pool")?;
    let results: Vec<Result<Vec<MoveReport>>> =
        pool.install(|| args.files.par_iter().map(|p| replay(p, args.stop_on_reject)).collect());

    for (path, result) in args.files.iter().zip(results) {
        for r in result? {
            if text { print_text(path, &r); } else { println!("{}", serde_json::to_string(&r)?); }
        }
    }
    Ok(())
}
