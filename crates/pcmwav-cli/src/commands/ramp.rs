//! Ramp command implementation
//!
//! Writes the deterministic rising "engine" pattern: a 16-bit counter that
//! starts at 6969 and wraps, multiplied by the frame index and divided by
//! four in unsigned 32-bit arithmetic.

use anyhow::Result;
use colored::Colorize;
use pcmwav::{AudioConfig, SampleBuffer};
use std::process::ExitCode;

/// Initial value of the 16-bit counter.
pub const RAMP_SEED: i16 = 6969;

/// Sample value for frame `index`.
pub fn ramp_sample(index: u32) -> i32 {
    let counter = RAMP_SEED.wrapping_add(index as i16);
    // Sign-extend, then multiply and divide as u32.
    let widened = i32::from(counter) as u32;
    (widened.wrapping_mul(index) / 4) as i32
}

/// Run the ramp command
///
/// # Arguments
/// * `config` - Audio layout
/// * `seconds` - Length of the emitted clip
/// * `buffer_seconds` - Buffer length in whole seconds (default: `seconds`)
/// * `output` - Output WAV path
///
/// # Returns
/// Exit code: 0 on success
pub fn run(
    config: AudioConfig,
    seconds: u32,
    buffer_seconds: Option<u32>,
    output: &str,
) -> Result<ExitCode> {
    let mut buffer = SampleBuffer::with_seconds(config, buffer_seconds.unwrap_or(seconds))?;
    let samples = config.samples_from_seconds(seconds);

    for i in 0..samples {
        // Frame indices past u32 wrap the same way the counter does.
        buffer.write_sample(i, ramp_sample(i as u32))?;
    }

    pcmwav::write_file(output, &config, buffer.as_bytes(), samples)?;

    println!(
        "{} {} ({} samples, {}s)",
        "Wrote".green().bold(),
        output,
        samples,
        seconds
    );
    Ok(ExitCode::SUCCESS)
}
