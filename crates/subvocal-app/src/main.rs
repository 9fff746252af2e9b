//! Subvocal Decoder Demo
//!
//! Trains the decoder on synthetic labelled signal windows, then decodes a
//! fresh window end to end: predicted word, dictionary definition, and
//! nearest abstract concept.
//!
//! # Usage
//!
//! ```bash
//! # Train on the default vocabulary and decode one window per word
//! subvocal demo
//!
//! # Custom vocabulary, more training repeats, offline (skip the lookup)
//! subvocal demo --words water,help,stop --repeats 10 --offline
//! ```

use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use subvocal_core::types::RawSample;
use subvocal_core::DEFINITION_NOT_FOUND;
use subvocal_native::decoder::SubvocalDecoder;
use subvocal_native::simulation::{SignalSimulator, SimulationConfig};

/// Subvocal word decoder
#[derive(Parser, Debug)]
#[command(name = "subvocal")]
#[command(author, version, about = "Subvocal biosignal word decoder", long_about = None)]
struct Cli {
    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Train on synthetic data and decode one window per word (default)
    Demo {
        /// Comma-separated training vocabulary
        #[arg(long, default_value = "water,help,yes,no")]
        words: String,

        /// Training windows per word
        #[arg(long, default_value = "6")]
        repeats: usize,

        /// Skip the network definition lookup
        #[arg(long)]
        offline: bool,
    },
}

fn init_tracing(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let (words, repeats, offline) = match cli.command {
        Some(Commands::Demo {
            words,
            repeats,
            offline,
        }) => (words, repeats, offline),
        None => ("water,help,yes,no".to_string(), 6, false),
    };

    let vocabulary: Vec<&str> = words.split(',').map(str::trim).filter(|w| !w.is_empty()).collect();
    if vocabulary.is_empty() {
        warn!("no vocabulary words given, nothing to do");
        return;
    }

    if let Err(err) = run_demo(&vocabulary, repeats, offline).await {
        warn!(error = %err, "demo failed");
        std::process::exit(1);
    }
}

async fn run_demo(
    vocabulary: &[&str],
    repeats: usize,
    offline: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(?vocabulary, repeats, "generating synthetic training data");
    let mut simulator = SignalSimulator::new(SimulationConfig::default());
    let batch = simulator.batch(vocabulary, repeats);

    let samples: Vec<RawSample> = batch.iter().map(|s| s.sample.clone()).collect();
    let labels: Vec<String> = batch.iter().map(|s| s.label.clone()).collect();

    let mut decoder = SubvocalDecoder::new();
    info!("training dual-pathway ensemble");
    decoder.train(&samples, &labels)?;
    info!(vocabulary = decoder.vocabulary_size(), "training complete");

    // Decode a fresh window per word. Offline mode still decodes and
    // grounds; it just skips the network lookup.
    let mut fresh = SignalSimulator::new(SimulationConfig {
        seed: 0xdec0de,
        ..SimulationConfig::default()
    });
    for word in vocabulary {
        let window = fresh.window_for(word);
        if offline {
            let predicted = decoder.predict(&window)?;
            info!(actual = %word, predicted = %predicted, "decoded (offline)");
        } else {
            let result = decoder.process_and_predict(&window).await?;
            if result.definition == DEFINITION_NOT_FOUND {
                warn!(word = %result.predicted_word, "no definition available");
            }
            info!(
                actual = %word,
                predicted = %result.predicted_word,
                concept = %result.universal_concept,
                definition = %result.definition,
                "decoded"
            );
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
