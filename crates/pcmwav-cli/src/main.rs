//! pcmwav CLI - synthesize PCM clips and inspect WAV files
//!
//! This binary drives the pcmwav codec: it renders tones and test patterns
//! into sample buffers, writes them as WAV files, and reads headers back.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use pcmwav_cli::audio_config::{self, DEFAULT_BIT_DEPTH, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE};
use pcmwav_cli::commands;

/// pcmwav - PCM sample packing and WAV output
#[derive(Parser)]
#[command(name = "pcmwav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write sine segments back to back into a WAV file
    Tone {
        /// Segment as FREQ:SECONDS (repeatable, played in order)
        #[arg(short, long = "note", required = true)]
        notes: Vec<String>,

        /// Peak amplitude (default: half of full scale for the bit depth)
        #[arg(short, long, allow_negative_numbers = true)]
        amplitude: Option<i32>,

        /// Buffer length in whole seconds (default: exactly the notes' total)
        #[arg(long)]
        buffer_seconds: Option<u32>,

        /// Output WAV path
        #[arg(short, long, default_value = "audio.wav")]
        output: String,

        /// Number of channels (1 or 2)
        #[arg(long, default_value_t = DEFAULT_CHANNELS)]
        channels: u16,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Bits per sample (8, 16, 24 or 32)
        #[arg(long, default_value_t = DEFAULT_BIT_DEPTH)]
        bit_depth: u16,

        /// JSON audio config file (overrides the layout flags)
        #[arg(long)]
        config: Option<String>,
    },

    /// Write the deterministic rising test pattern into a WAV file
    Ramp {
        /// Clip length in seconds
        #[arg(short, long, default_value_t = 3)]
        seconds: u32,

        /// Buffer length in whole seconds (default: the clip length)
        #[arg(long)]
        buffer_seconds: Option<u32>,

        /// Output WAV path
        #[arg(short, long, default_value = "audio.wav")]
        output: String,

        /// Number of channels (1 or 2)
        #[arg(long, default_value_t = DEFAULT_CHANNELS)]
        channels: u16,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Bits per sample (8, 16, 24 or 32)
        #[arg(long, default_value_t = DEFAULT_BIT_DEPTH)]
        bit_depth: u16,

        /// JSON audio config file (overrides the layout flags)
        #[arg(long)]
        config: Option<String>,
    },

    /// Print the header fields, duration and PCM hash of a WAV file
    Inspect {
        /// Path to the WAV file
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tone {
            notes,
            amplitude,
            buffer_seconds,
            output,
            channels,
            sample_rate,
            bit_depth,
            config,
        } => audio_config::resolve(channels, sample_rate, bit_depth, config.as_deref())
            .and_then(|cfg| commands::tone::run(cfg, &notes, amplitude, buffer_seconds, &output)),
        Commands::Ramp {
            seconds,
            buffer_seconds,
            output,
            channels,
            sample_rate,
            bit_depth,
            config,
        } => audio_config::resolve(channels, sample_rate, bit_depth, config.as_deref())
            .and_then(|cfg| commands::ramp::run(cfg, seconds, buffer_seconds, &output)),
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
