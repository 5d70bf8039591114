//! Runner state shared between the stdin reader and the game loop thread.

use std::path::PathBuf;

use garrison_core::commands::GameCommand;

/// Commands sent from the stdin reader to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A game command to forward to the simulation engine.
    Game(GameCommand),
    /// Shut down the game loop thread gracefully, aborting the session.
    Shutdown,
}

/// Options controlling a runner session, parsed from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Number of player seats (1 or 2).
    pub players: u8,
    /// RNG seed. Same seed + same inputs = same session.
    pub seed: u64,
    /// Level files to play in order. Empty = the built-in campaign.
    pub levels: Vec<PathBuf>,
    /// Abort after this many frames even if the session is still going.
    pub max_frames: Option<u64>,
    /// Print a snapshot JSON line after every frame.
    pub snapshots: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            players: 1,
            seed: 42,
            levels: Vec::new(),
            max_frames: None,
            snapshots: false,
        }
    }
}

impl RunOptions {
    /// Parse options from raw arguments (program name already stripped).
    /// Unknown flags are rejected so a typo doesn't silently run defaults.
    pub fn parse(args: &[String]) -> Result<RunOptions, String> {
        let mut opts = RunOptions::default();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--players" => {
                    let v = take_value(args, &mut i, "--players")?;
                    opts.players = v
                        .parse()
                        .map_err(|_| format!("--players: invalid count '{v}'"))?;
                }
                "--seed" => {
                    let v = take_value(args, &mut i, "--seed")?;
                    opts.seed = v
                        .parse()
                        .map_err(|_| format!("--seed: invalid seed '{v}'"))?;
                }
                "--level" => {
                    let v = take_value(args, &mut i, "--level")?;
                    opts.levels.push(PathBuf::from(v));
                }
                "--frames" => {
                    let v = take_value(args, &mut i, "--frames")?;
                    let n: u64 = v
                        .parse()
                        .map_err(|_| format!("--frames: invalid count '{v}'"))?;
                    opts.max_frames = Some(n);
                }
                "--snapshots" => {
                    opts.snapshots = true;
                }
                other => return Err(format!("unknown argument: {other}")),
            }
            i += 1;
        }
        Ok(opts)
    }
}

/// Step past a flag to its value, erroring if the value is missing.
fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    match args.get(*i) {
        Some(v) => Ok(v),
        None => Err(format!("{flag} requires a value")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let opts = RunOptions::parse(&[]).unwrap();
        assert_eq!(opts.players, 1);
        assert_eq!(opts.seed, 42);
        assert!(opts.levels.is_empty());
        assert!(opts.max_frames.is_none());
        assert!(!opts.snapshots);
    }

    #[test]
    fn test_parse_full_set() {
        let args = strings(&[
            "--players",
            "2",
            "--seed",
            "7",
            "--level",
            "a.txt",
            "--level",
            "b.txt",
            "--frames",
            "600",
            "--snapshots",
        ]);
        let opts = RunOptions::parse(&args).unwrap();
        assert_eq!(opts.players, 2);
        assert_eq!(opts.seed, 7);
        assert_eq!(opts.levels.len(), 2);
        assert_eq!(opts.levels[1], PathBuf::from("b.txt"));
        assert_eq!(opts.max_frames, Some(600));
        assert!(opts.snapshots);
    }

    #[test]
    fn test_parse_rejects_unknown_flag() {
        let err = RunOptions::parse(&strings(&["--speed", "3"])).unwrap_err();
        assert!(err.contains("--speed"));
    }

    #[test]
    fn test_parse_rejects_missing_value() {
        let err = RunOptions::parse(&strings(&["--seed"])).unwrap_err();
        assert!(err.contains("--seed"));
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        assert!(RunOptions::parse(&strings(&["--frames", "soon"])).is_err());
        assert!(RunOptions::parse(&strings(&["--players", "-1"])).is_err());
    }
}
