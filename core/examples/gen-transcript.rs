//! Generates replay JSON files for the host.
//!
//! Usage:
//!   cargo run -p sky-brawl-core --example gen-transcript -- [idle|combat|short] > replay.json

use sky_brawl_core::*;

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "idle".to_string());

    let frames: Vec<InputFrame> = match mode.as_str() {
        "idle" => {
            // Both fighters stand on their platforms for a minute
            vec![InputFrame::idle(); 3600]
        }
        "combat" => {
            // Comet walks right and swings, Blaze walks left and jumps now and then
            (0..1800)
                .map(|t| {
                    let mut held = Vec::new();
                    if t % 60 < 45 {
                        held.push(KeyCode::D);
                        held.push(KeyCode::Left);
                    }
                    if t % 24 == 0 {
                        held.push(KeyCode::J);
                    }
                    if t % 120 == 60 {
                        held.push(KeyCode::Up);
                    }
                    InputFrame::holding(&held)
                })
                .collect()
        }
        "short" => {
            // Quick smoke test
            vec![InputFrame::idle(); 100]
        }
        _ => {
            eprintln!("Unknown mode: {}. Use 'idle', 'combat', or 'short'", mode);
            std::process::exit(1);
        }
    };

    let input = ReplayInput {
        config: GameConfig::default(),
        frames,
    };

    // Verify by running the sim
    let output = match run_replay(&input) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Replay rejected: {e}");
            std::process::exit(1);
        }
    };

    eprintln!("=== Sim result ({} mode) ===", mode);
    eprintln!("Frames: {}", output.frames);
    eprintln!(
        "Attacks: {}, hits: {}, KOs: {}",
        output.tally.attacks, output.tally.hits, output.tally.knockouts
    );
    for f in &output.final_state.fighters {
        eprintln!("{}: stocks={}, percent={}", f.name, f.stocks, f.percent);
    }

    println!("{}", serde_json::to_string(&input).unwrap());
}
