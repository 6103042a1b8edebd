pub mod booking;
pub mod chat;
pub mod commands;
pub mod config;
pub mod generative;
pub mod knowledge;
pub mod models;
pub mod triage;

use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;

use booking::AppointmentBook;
use chat::{render_plain, ChatResponder, WELCOME_MESSAGE};
use commands::{CliState, HELP_TEXT};
use generative::ollama::OllamaGenerator;
use triage::Classifier;

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(io::stderr)
        .try_init();
}

/// Interactive symptom chat on stdin/stdout.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = config::AppConfig::from_env();
    tracing::info!(
        version = config::APP_VERSION,
        data_dir = %config.data_dir.display(),
        fallback = config.fallback_enabled,
        "TriageCare starting"
    );

    let book = AppointmentBook::open(&config.data_dir)?;

    let ollama = if config.fallback_enabled {
        match OllamaGenerator::new(&config.ollama_url, &config.model, config.generate_timeout_secs) {
            Ok(generator) => Some(generator),
            Err(e) => {
                tracing::warn!(error = %e, "Generative fallback disabled");
                None
            }
        }
    } else {
        None
    };

    let base = ChatResponder::new(Classifier::builtin());
    let responder = match &ollama {
        Some(generator) => base.with_generator(generator),
        None => base,
    };

    let mut state = CliState::new(book, chrono::Local::now().date_naive());
    let mut rng = rand::thread_rng();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}\n\n{HELP_TEXT}\n", render_plain(WELCOME_MESSAGE))?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim();

        let reply = if let Some(command) = input.strip_prefix('/') {
            match state.command(command) {
                Ok(Some(text)) => Some(text),
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Command failed");
                    Some(format!("Sorry, that did not work: {e}"))
                }
            }
        } else if state.is_booking() {
            if input.is_empty() {
                continue;
            }
            match state.booking_input(input, &mut rng) {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!(error = %e, "Booking step failed");
                    Some(format!("Sorry, that did not work: {e}"))
                }
            }
        } else {
            responder
                .respond(state.context_mut(), input)
                .map(|reply| render_plain(&reply.text))
        };

        if let Some(text) = reply {
            writeln!(stdout, "{text}\n")?;
        }
        stdout.flush()?;
    }

    tracing::info!(utterances = state.context().transcript().len(), "Session ended");
    Ok(())
}
