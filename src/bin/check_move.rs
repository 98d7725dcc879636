use anyhow::{Context, Result};
use boardcheck::rules::{finalize, resolve, MoveLog, MoveRecord};
use boardcheck::{Board, Color};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "check_move", about = "Validate one previous/proposed board pair")]
struct Args {
    /// Last accepted board as 64 wire characters ('X' = empty)
    #[arg(value_name = "BEFORE")]
    before: String,
    /// Proposed board as 64 wire characters
    #[arg(value_name = "AFTER")]
    after: String,
    /// Side making the move: 'white' or 'black'
    #[arg(long, default_value = "white")]
    mover: Color,
    /// Earlier accepted moves in coordinate form, oldest first (e.g. e2e4,e7e5)
    #[arg(long, value_delimiter = ',')]
    history: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let before = Board::from_bytes(args.before.as_bytes()).context("BEFORE board")?;
    let after = Board::from_bytes(args.after.as_bytes()).context("AFTER board")?;
    let log = args
        .history
        .iter()
        .map(|m| m.parse::<MoveRecord>().with_context(|| format!("history move '{m}'")))
        .collect::<Result<MoveLog>>()?;

    match resolve(&before, &after, args.mover, &log) {
        Ok(verdict) => {
            let finished = finalize(&after, &verdict);
            let out = serde_json::json!({
                "legal": true,
                "verdict": verdict,
                "state": finished.to_wire_string(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
        Err(e) => {
            let out = serde_json::json!({ "legal": false, "error": e.to_string() });
            println!("{}", serde_json::to_string_pretty(&out)?);
            std::process::exit(1);
        }
    }
}
