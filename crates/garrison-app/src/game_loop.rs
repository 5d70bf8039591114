//! Game loop thread — runs the simulation at a fixed frame cadence.
//!
//! The engine is created inside this thread because it's cleaner for
//! ownership. Commands arrive via `mpsc` channel; the session result
//! comes back through the thread's join handle.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use garrison_core::commands::GameCommand;
use garrison_core::constants::FRAME_MS;
use garrison_core::state::SessionResult;
use garrison_sim::engine::{GameEngine, SessionConfig};
use garrison_terrain::LevelSet;

use crate::state::{GameLoopCommand, RunOptions};

/// Nominal duration of one frame.
const FRAME_DURATION: Duration = Duration::from_millis(FRAME_MS as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the stdin reader and the join handle
/// yielding the final session result.
pub fn spawn_game_loop(
    options: &RunOptions,
    levels: LevelSet,
) -> (mpsc::Sender<GameLoopCommand>, JoinHandle<SessionResult>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let config = SessionConfig {
        seed: options.seed,
        player_count: options.players,
        ..SessionConfig::default()
    };
    let max_frames = options.max_frames;
    let snapshots = options.snapshots;

    let handle = std::thread::Builder::new()
        .name("garrison-game-loop".into())
        .spawn(move || {
            let engine = GameEngine::new(levels, config);
            run_game_loop(engine, cmd_rx, max_frames, snapshots)
        })
        .expect("Failed to spawn game loop thread");

    (cmd_tx, handle)
}

/// The game loop. Runs until the session finishes: naturally, via a
/// queued `QuitToMenu`, via `Shutdown`, or at the `--frames` cap. A
/// disconnected channel only closes the command feed; the session
/// keeps playing out.
fn run_game_loop(
    mut engine: GameEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    max_frames: Option<u64>,
    snapshots: bool,
) -> SessionResult {
    let mut next_frame_time = Instant::now();
    let mut frame: u64 = 0;
    let mut feed_open = true;

    loop {
        // 1. Drain all pending commands
        while feed_open {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Game(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    engine.queue_command(GameCommand::QuitToMenu);
                    feed_open = false;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => feed_open = false,
            }
        }

        // 2. Advance one frame (the engine handles pause internally)
        let snapshot = engine.update(FRAME_MS);
        frame += 1;

        // 3. Stream the snapshot if asked to
        if snapshots {
            match serde_json::to_string(&snapshot) {
                Ok(line) => println!("{line}"),
                Err(e) => log::error!("snapshot serialization failed: {e}"),
            }
        }

        if let Some(result) = engine.result() {
            log::info!("game loop stopped after {frame} frame(s)");
            return result;
        }

        if let Some(limit) = max_frames {
            if frame >= limit {
                // One more update settles the abort before the loop exits.
                engine.queue_command(GameCommand::QuitToMenu);
                continue;
            }
        }

        // 4. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind — reset to avoid catch-up spiral
            next_frame_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garrison_core::commands::TankControl;
    use garrison_core::enums::{PlayerSlot, RoundOutcome};

    fn builtin_levels() -> LevelSet {
        garrison_terrain::builtin().unwrap()
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Game(GameCommand::Press {
            slot: PlayerSlot::One,
            control: TankControl::Fire,
        }))
        .unwrap();
        tx.send(GameLoopCommand::Game(GameCommand::TogglePause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Game(GameCommand::Press { .. })
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Game(GameCommand::TogglePause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_quit_command_ends_loop() {
        let options = RunOptions::default();
        let (tx, handle) = spawn_game_loop(&options, builtin_levels());

        tx.send(GameLoopCommand::Game(GameCommand::QuitToMenu))
            .unwrap();

        let result = handle.join().unwrap();
        assert_eq!(result.outcome, RoundOutcome::Aborted);
        assert_eq!(result.players.len(), 1);
    }

    #[test]
    fn test_shutdown_aborts_session() {
        let options = RunOptions {
            players: 2,
            ..RunOptions::default()
        };
        let (tx, handle) = spawn_game_loop(&options, builtin_levels());

        tx.send(GameLoopCommand::Shutdown).unwrap();

        let result = handle.join().unwrap();
        assert_eq!(result.outcome, RoundOutcome::Aborted);
        assert_eq!(result.players.len(), 2);
    }

    #[test]
    fn test_frame_cap_aborts_after_feed_closes() {
        let options = RunOptions {
            max_frames: Some(5),
            ..RunOptions::default()
        };
        let (tx, handle) = spawn_game_loop(&options, builtin_levels());
        // Dropping the sender disconnects the feed; the loop must keep
        // simulating until the cap.
        drop(tx);

        let result = handle.join().unwrap();
        assert_eq!(result.outcome, RoundOutcome::Aborted);
        assert_eq!(result.level_reached, 0);
    }

    #[test]
    fn test_frame_duration_constant() {
        assert_eq!(FRAME_DURATION.as_millis(), FRAME_MS as u128);
    }
}
