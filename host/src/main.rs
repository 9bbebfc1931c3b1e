use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use serde::Serialize;

use sky_brawl_core::{run_replay, EventTally, InputFrame, MatchSnapshot, ReplayInput};

/// Replay a recorded sky-brawl match and print the resulting state.
#[derive(Parser, Debug)]
#[command(name = "sky-brawl-host", version)]
struct Args {
    /// Replay JSON file. Read from stdin when omitted.
    replay: Option<PathBuf>,

    /// Pretty-print the report.
    #[arg(long)]
    pretty: bool,

    /// Run this many idle frames when the replay has none. Without a replay
    /// path, stdin is not read.
    #[arg(long)]
    frames: Option<usize>,
}

fn load_input(path: Option<&PathBuf>) -> Result<ReplayInput> {
    let json_str = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading replay {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading replay from stdin")?;
            buf
        }
    };
    serde_json::from_str(&json_str).context("parsing replay JSON")
}

/// Printed to stdout; hashes are hex.
#[derive(Serialize)]
struct Report<'a> {
    frames: u64,
    tally: &'a EventTally,
    final_state: &'a MatchSnapshot,
    transcript_hash: String,
    state_hash: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let input = match (&args.replay, args.frames) {
        (None, Some(n)) => ReplayInput::idle(n),
        (path, frames) => {
            let mut input = load_input(path.as_ref())?;
            match frames {
                Some(n) if input.frames.is_empty() => {
                    input.frames = vec![InputFrame::idle(); n];
                }
                _ => {}
            }
            input
        }
    };
    info!(
        "replaying {} frames on a {}x{} stage",
        input.frames.len(),
        input.config.width,
        input.config.height
    );

    let start = Instant::now();
    let output = run_replay(&input).context("replay rejected")?;
    let elapsed = start.elapsed();

    info!(
        "{} frames in {:.1}ms: {} attacks, {} hits, {} KOs",
        output.frames,
        elapsed.as_secs_f64() * 1000.0,
        output.tally.attacks,
        output.tally.hits,
        output.tally.knockouts
    );
    for f in &output.final_state.fighters {
        info!("{}: {} stocks, {}%", f.name, f.stocks, f.percent.floor());
    }

    let report = Report {
        frames: output.frames,
        tally: &output.tally,
        final_state: &output.final_state,
        transcript_hash: hex::encode(output.transcript_hash),
        state_hash: hex::encode(output.state_hash),
    };
    let text = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{text}");
    Ok(())
}
