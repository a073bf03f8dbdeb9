//! Command definitions for the drowsii CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog::{Sound, SoundCategory};
use crate::types::{clamp_volume, ALARM_OPTIONS, NO_ALARM};

// ============================================================================
// CLI Structure
// ============================================================================

/// Drowsii - ambient sleep sounds for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "drowsii",
    version,
    about = "Ambient sleep sounds with a sleep timer",
    long_about = "Mix white, pink, brown noise and nature sounds, play them for a fixed\n\
                  duration, and take a short quiz about your sleep habits.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List sound categories and their sounds
    Catalog {
        /// Only list this category (e.g. "Pink Noise")
        #[arg(short, long, value_parser = parse_category)]
        category: Option<SoundCategory>,
    },

    /// Play a session of mixed sounds
    Play(PlayArgs),

    /// Take or manage the sleep-habits quiz
    Quiz {
        #[command(subcommand)]
        command: QuizCommand,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Quiz subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCommand {
    /// Answer the quiz interactively
    Take,
    /// Show saved answers and the cached recommendation
    Status,
    /// Forget saved answers
    Reset,
}

// ============================================================================
// Play Command Arguments
// ============================================================================

/// Arguments for the play command
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Sound to include; repeat for a mix (e.g. -s Rain -s Ocean)
    #[arg(short, long = "sound", required = true, value_parser = parse_sound)]
    pub sounds: Vec<Sound>,

    /// Category shown on the summary (defaults to the first sound's)
    #[arg(short, long, value_parser = parse_category)]
    pub category: Option<SoundCategory>,

    /// Session length in minutes (1-1440)
    #[arg(
        short,
        long,
        default_value = "30",
        value_parser = clap::value_parser!(u32).range(1..=1440)
    )]
    pub duration: u32,

    /// Alarm to show on the summary
    #[arg(short, long, default_value = NO_ALARM, value_parser = parse_alarm)]
    pub alarm: String,

    /// Per-sound volume as SOUND=LEVEL with LEVEL in 0..1 (e.g. Rain=0.8)
    #[arg(long = "volume", value_name = "SOUND=LEVEL", value_parser = parse_volume)]
    pub volumes: Vec<(Sound, f32)>,
}

impl PlayArgs {
    /// Returns the session length in seconds.
    pub fn duration_seconds(&self) -> u32 {
        self.duration * 60
    }

    /// Returns the category for the summary.
    pub fn category(&self) -> Option<SoundCategory> {
        self.category
            .or_else(|| self.sounds.first().map(|sound| sound.category()))
    }
}

// ============================================================================
// Value Parsers
// ============================================================================

fn parse_category(s: &str) -> Result<SoundCategory, String> {
    SoundCategory::from_label(s).ok_or_else(|| {
        let labels: Vec<&str> = SoundCategory::ALL.iter().map(|c| c.label()).collect();
        format!("unknown category '{}' (expected one of: {})", s, labels.join(", "))
    })
}

fn parse_sound(s: &str) -> Result<Sound, String> {
    Sound::from_name(s).ok_or_else(|| format!("unknown sound '{}'", s))
}

fn parse_alarm(s: &str) -> Result<String, String> {
    ALARM_OPTIONS
        .iter()
        .find(|label| label.eq_ignore_ascii_case(s.trim()))
        .map(|label| label.to_string())
        .ok_or_else(|| {
            format!(
                "unknown alarm '{}' (expected one of: {})",
                s,
                ALARM_OPTIONS.join(", ")
            )
        })
}

/// Parses `SOUND=LEVEL`. Levels outside 0..1 are clamped.
fn parse_volume(s: &str) -> Result<(Sound, f32), String> {
    let (name, level) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SOUND=LEVEL, got '{}'", s))?;
    let sound = parse_sound(name)?;
    let level: f32 = level
        .trim()
        .parse()
        .map_err(|_| format!("invalid volume level '{}'", level))?;
    Ok((sound, clamp_volume(level)))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["drowsii"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
            assert!(cli.config.is_none());
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["drowsii", "-v", "catalog"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_config_flag() {
            let cli = Cli::parse_from(["drowsii", "catalog", "--config", "/tmp/c.json"]);
            assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
        }

        #[test]
        fn test_parse_catalog() {
            let cli = Cli::parse_from(["drowsii", "catalog"]);
            assert!(matches!(
                cli.command,
                Some(Commands::Catalog { category: None })
            ));

            let cli = Cli::parse_from(["drowsii", "catalog", "--category", "brown noise"]);
            assert!(matches!(
                cli.command,
                Some(Commands::Catalog {
                    category: Some(SoundCategory::Brown)
                })
            ));
        }

        #[test]
        fn test_parse_unknown_category_fails() {
            assert!(Cli::try_parse_from(["drowsii", "catalog", "-c", "Jazz"]).is_err());
        }

        #[test]
        fn test_parse_quiz_commands() {
            for (arg, expected) in [
                ("take", QuizCommand::Take),
                ("status", QuizCommand::Status),
                ("reset", QuizCommand::Reset),
            ] {
                let cli = Cli::parse_from(["drowsii", "quiz", arg]);
                match cli.command {
                    Some(Commands::Quiz { command }) => assert_eq!(command, expected),
                    _ => panic!("Expected Quiz command"),
                }
            }
        }

        #[test]
        fn test_parse_completions_zsh() {
            let cli = Cli::parse_from(["drowsii", "completions", "zsh"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Zsh);
                }
                _ => panic!("Expected Completions command"),
            }
        }
    }

    // ------------------------------------------------------------------------
    // Play Command Tests
    // ------------------------------------------------------------------------

    mod play_args_tests {
        use super::*;

        fn parse_play(args: &[&str]) -> PlayArgs {
            let mut argv = vec!["drowsii", "play"];
            argv.extend_from_slice(args);
            match Cli::parse_from(argv).command {
                Some(Commands::Play(args)) => args,
                _ => panic!("Expected Play command"),
            }
        }

        #[test]
        fn test_parse_play_defaults() {
            let args = parse_play(&["--sound", "Rain"]);
            assert_eq!(args.sounds, vec![Sound::Rain]);
            assert_eq!(args.duration, 30);
            assert_eq!(args.duration_seconds(), 1800);
            assert_eq!(args.alarm, NO_ALARM);
            assert!(args.volumes.is_empty());
            assert_eq!(args.category(), Some(SoundCategory::Pink));
        }

        #[test]
        fn test_parse_play_mix() {
            let args = parse_play(&[
                "-s",
                "Rain",
                "-s",
                "ocean",
                "--category",
                "Pink Noise",
                "--duration",
                "60",
                "--alarm",
                "birdsong",
                "--volume",
                "Rain=0.8",
                "--volume",
                "Ocean=3",
            ]);
            assert_eq!(args.sounds, vec![Sound::Rain, Sound::Ocean]);
            assert_eq!(args.category(), Some(SoundCategory::Pink));
            assert_eq!(args.duration_seconds(), 3600);
            assert_eq!(args.alarm, "Birdsong");
            assert_eq!(args.volumes, vec![(Sound::Rain, 0.8), (Sound::Ocean, 1.0)]);
        }

        #[test]
        fn test_parse_play_requires_sound() {
            assert!(Cli::try_parse_from(["drowsii", "play"]).is_err());
        }

        #[test]
        fn test_parse_play_rejects_bad_values() {
            assert!(Cli::try_parse_from(["drowsii", "play", "-s", "Kazoo"]).is_err());
            assert!(Cli::try_parse_from(["drowsii", "play", "-s", "Rain", "-d", "0"]).is_err());
            assert!(Cli::try_parse_from(["drowsii", "play", "-s", "Rain", "-a", "Siren"]).is_err());
            assert!(
                Cli::try_parse_from(["drowsii", "play", "-s", "Rain", "--volume", "Rain"]).is_err()
            );
        }
    }

    // ------------------------------------------------------------------------
    // Value Parser Tests
    // ------------------------------------------------------------------------

    mod parser_tests {
        use super::*;

        #[test]
        fn test_parse_volume() {
            assert_eq!(parse_volume("Rain=0.25"), Ok((Sound::Rain, 0.25)));
            assert_eq!(parse_volume("white_noise=-1"), Ok((Sound::WhiteNoise, 0.0)));
            assert!(parse_volume("Rain=loud").is_err());
            assert!(parse_volume("Kazoo=0.5").is_err());
        }

        #[test]
        fn test_parse_alarm_is_case_insensitive() {
            assert_eq!(parse_alarm("no alarm"), Ok(NO_ALARM.to_string()));
            assert!(parse_alarm("").is_err());
        }
    }
}
