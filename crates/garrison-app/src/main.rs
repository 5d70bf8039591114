//! garrison-app: headless tank-combat session runner.
//!
//! Usage:
//!   garrison-app --seed 7 --frames 600
//!   garrison-app --players 2 --level stage1.txt --level stage2.txt

use std::io::BufRead;
use std::process;
use std::sync::mpsc;

use garrison_app::game_loop;
use garrison_app::state::{GameLoopCommand, RunOptions};
use garrison_core::commands::GameCommand;
use garrison_terrain::LevelSet;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args
        .iter()
        .any(|a| a == "--help" || a == "-h" || a == "help")
    {
        print_usage();
        return;
    }

    let options = match RunOptions::parse(&args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage();
            process::exit(1);
        }
    };

    let levels = match load_levels(&options) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error loading levels: {e}");
            process::exit(1);
        }
    };

    let (cmd_tx, loop_handle) = game_loop::spawn_game_loop(&options, levels);

    // Reader thread never gets joined. It blocks on stdin until EOF and
    // dies with the process once the result is printed.
    let reader = std::thread::Builder::new()
        .name("garrison-stdin".into())
        .spawn(move || read_commands(cmd_tx));
    if let Err(e) = reader {
        eprintln!("Error spawning stdin reader: {e}");
        process::exit(1);
    }

    let result = match loop_handle.join() {
        Ok(r) => r,
        Err(_) => {
            eprintln!("Error: game loop thread panicked");
            process::exit(1);
        }
    };

    match serde_json::to_string(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing result: {e}");
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "garrison-app: headless tank-combat session runner\n\
         \n\
         Options:\n\
         \n\
           --players <1|2>    Number of player seats (default: 1)\n\
           --seed <N>         RNG seed for a reproducible session (default: 42)\n\
           --level <path>     Level file to play; repeat for a campaign\n\
                              (default: built-in levels)\n\
           --frames <N>       Abort after N frames and report the session\n\
           --snapshots        Print a snapshot JSON line every frame\n\
         \n\
         Game commands are read from stdin, one JSON object per line:\n\
         \n\
           {{\"type\":\"Press\",\"slot\":\"One\",\"control\":\"Fire\"}}\n\
           {{\"type\":\"TogglePause\"}}\n\
         \n\
         The final session result is printed to stdout as JSON.\n"
    );
}

fn load_levels(options: &RunOptions) -> std::io::Result<LevelSet> {
    if options.levels.is_empty() {
        garrison_terrain::builtin()
    } else {
        LevelSet::from_files(&options.levels)
    }
}

/// Forward stdin lines to the game loop as commands. Malformed lines
/// are logged and skipped; a read failure aborts the session; EOF just
/// closes the feed and lets the session play out.
fn read_commands(tx: mpsc::Sender<GameLoopCommand>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("stdin read failed: {e}");
                let _ = tx.send(GameLoopCommand::Shutdown);
                return;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<GameCommand>(trimmed) {
            Ok(cmd) => {
                if tx.send(GameLoopCommand::Game(cmd)).is_err() {
                    return;
                }
            }
            Err(e) => log::warn!("ignoring malformed command line: {e}"),
        }
    }
}
