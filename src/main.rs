//! Drowsii CLI - ambient sleep sounds with a sleep timer
//!
//! Mix sounds from four categories (white, pink and brown noise, nature),
//! play them for a fixed duration, and take a short sleep-habits quiz.

use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};

use drowsii::catalog::{Sound, SoundCategory};
use drowsii::cli::{Cli, Commands, Display, PlayArgs, QuizCommand};
use drowsii::config::AppConfig;
use drowsii::quiz::{answered_pairs, QuizEvent, SleepQuiz};
use drowsii::recommendation::answers_hash;
use drowsii::session::SoundSessionFlow;
use drowsii::sound::RodioPlaybackSession;
use drowsii::store::SettingsStore;
use drowsii::types::PlaybackPhase;
use drowsii::wizard::WizardAction;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Catalog { category }) => {
            let categories = match category {
                Some(category) => vec![category],
                None => SoundCategory::ALL.to_vec(),
            };
            Display::show_catalog(&categories);
        }
        Some(Commands::Play(args)) => {
            let config = load_config(cli.config.as_deref())?;
            play(args, &config).await?;
        }
        Some(Commands::Quiz { command }) => {
            let config = load_config(cli.config.as_deref())?;
            let store = config
                .settings_store()
                .context("Failed to open settings")?;
            quiz(command, &store)?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    AppConfig::load_or_default(path).context("Failed to load configuration")
}

// ============================================================================
// play
// ============================================================================

enum PlayEvent {
    Tick(Option<drowsii::session::CountdownTick>),
    Interrupted,
}

async fn play(args: PlayArgs, config: &AppConfig) -> Result<()> {
    let category = args.category().context("No sound selected")?;

    let playback = RodioPlaybackSession::new().context("Failed to open audio output")?;
    let mut flow = SoundSessionFlow::new(playback, config.resolver());

    let mut volumes: BTreeMap<Sound, f32> = args
        .sounds
        .iter()
        .map(|sound| (*sound, config.default_volume))
        .collect();
    volumes.extend(args.volumes.iter().copied());
    flow.set_initial_volumes(volumes);

    flow.apply(WizardAction::SelectCategory(category))?;
    for sound in &args.sounds {
        if !flow.wizard().draft().contains(*sound) {
            flow.apply(WizardAction::ToggleSound(*sound))?;
        }
    }
    flow.apply(WizardAction::Continue)?;
    flow.apply(WizardAction::SelectDuration(args.duration_seconds()))?;
    flow.apply(WizardAction::SelectAlarm(args.alarm.clone()))?;

    let controller = flow.present()?;
    Display::show_summary(&controller.summary());

    controller.toggle_playback();
    for notice in controller.take_notices() {
        Display::show_notice(&notice);
    }
    if !controller.is_playing() {
        bail!("Nothing could be played");
    }
    Display::show_remaining(controller.remaining_seconds());

    loop {
        let event = tokio::select! {
            tick = controller.next_tick() => PlayEvent::Tick(tick),
            _ = tokio::signal::ctrl_c() => PlayEvent::Interrupted,
        };

        match event {
            PlayEvent::Tick(Some(tick)) => {
                if let Some(remaining) = controller.handle_tick(tick) {
                    Display::show_remaining(remaining);
                }
                if controller.phase() == PlaybackPhase::Finished {
                    Display::show_finished();
                    break;
                }
            }
            PlayEvent::Tick(None) => break,
            PlayEvent::Interrupted => {
                let remaining = controller.remaining_seconds();
                controller.stop();
                Display::show_stopped(remaining);
                break;
            }
        }
    }

    flow.close();
    Ok(())
}

// ============================================================================
// quiz
// ============================================================================

fn quiz(command: QuizCommand, store: &SettingsStore) -> Result<()> {
    match command {
        QuizCommand::Take => take_quiz(store),
        QuizCommand::Status => {
            let answers = store.quiz_answers();
            Display::show_quiz_status(&answered_pairs(&answers));
            if let Some(response) = store.cached_recommendation(answers_hash(&answers)) {
                println!();
                Display::show_recommendation(&response);
            }
            Ok(())
        }
        QuizCommand::Reset => {
            store.reset_quiz().context("Failed to save settings")?;
            Display::show_success("Quiz answers cleared");
            Ok(())
        }
    }
}

fn take_quiz(store: &SettingsStore) -> Result<()> {
    if store.has_completed_quiz() {
        println!("You have already completed the sleep quiz.");
        println!("  Run `drowsii quiz reset` to take it again.");
        return Ok(());
    }

    let mut quiz = SleepQuiz::new();
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(question) = quiz.current_question() {
        let (answered, total) = quiz.progress();
        Display::show_question(answered + 1, total, question);

        let Some(line) = lines.next() else {
            bail!("Quiz cancelled");
        };
        let line = line.context("Failed to read answer")?;

        let option = match line.trim().parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => {
                Display::show_error("Enter the number of an option");
                continue;
            }
        };

        match quiz.answer(option) {
            Ok(QuizEvent::Advanced { .. }) => {}
            Ok(QuizEvent::Completed { answers }) => {
                store
                    .record_quiz_completion(&answers)
                    .context("Failed to save quiz answers")?;
                Display::show_success("Quiz completed");
            }
            Err(e) => Display::show_error(&e.to_string()),
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
