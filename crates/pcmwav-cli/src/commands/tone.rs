//! Tone command implementation
//!
//! Renders one or more sine segments back to back into a single buffer and
//! writes it as a WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use pcmwav::{AudioConfig, SampleBuffer, WavResult};
use std::f64::consts::PI;
use std::process::ExitCode;

/// One sine segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Frequency in Hz.
    pub freq: f64,
    /// Length in seconds.
    pub seconds: f64,
}

/// Parses a `FREQ:SECONDS` note, e.g. `260:0.5`.
pub fn parse_note(s: &str) -> Result<Note> {
    let (freq, seconds) = s
        .split_once(':')
        .with_context(|| format!("Note '{}' must be FREQ:SECONDS", s))?;
    let freq: f64 = freq
        .trim()
        .parse()
        .with_context(|| format!("Invalid frequency in note '{}'", s))?;
    let seconds: f64 = seconds
        .trim()
        .parse()
        .with_context(|| format!("Invalid duration in note '{}'", s))?;

    if !freq.is_finite() || freq <= 0.0 {
        anyhow::bail!("Frequency must be positive in note '{}'", s);
    }
    if !seconds.is_finite() || seconds < 0.0 {
        anyhow::bail!("Duration must be non-negative in note '{}'", s);
    }
    Ok(Note { freq, seconds })
}

/// Half of full scale for the configured bit depth.
pub fn default_amplitude(config: &AudioConfig) -> i32 {
    let full_scale = (1i64 << (config.bit_depth() - 1)) - 1;
    (full_scale / 2) as i32
}

/// Writes `samples` frames of a sine wave starting at frame `start`.
///
/// Phase is computed from the absolute frame index, so consecutive
/// segments join without resetting time.
///
/// # Returns
/// Number of frames written
pub fn render_sine(
    buffer: &mut SampleBuffer,
    start: u64,
    samples: u64,
    freq: f64,
    amplitude: i32,
) -> WavResult<u64> {
    let rate = f64::from(buffer.config().sample_rate());
    for i in 0..samples {
        let t = (start + i) as f64 / rate;
        let sample = (f64::from(amplitude) * (2.0 * PI * freq * t).sin()) as i32;
        buffer.write_sample(start + i, sample)?;
    }
    Ok(samples)
}

/// Run the tone command
///
/// # Arguments
/// * `config` - Audio layout
/// * `notes` - Segments in `FREQ:SECONDS` form, played in order
/// * `amplitude` - Peak amplitude (default: half of full scale)
/// * `buffer_seconds` - Buffer length in whole seconds (default: exactly the notes' total)
/// * `output` - Output WAV path
///
/// # Returns
/// Exit code: 0 on success
pub fn run(
    config: AudioConfig,
    notes: &[String],
    amplitude: Option<i32>,
    buffer_seconds: Option<u32>,
    output: &str,
) -> Result<ExitCode> {
    let notes = notes
        .iter()
        .map(|n| parse_note(n))
        .collect::<Result<Vec<_>>>()?;
    if notes.is_empty() {
        anyhow::bail!("At least one --note is required");
    }

    let amplitude = amplitude.unwrap_or_else(|| default_amplitude(&config));
    if i64::from(amplitude).abs() > (1i64 << (config.bit_depth() - 1)) - 1 {
        tracing::warn!(
            amplitude,
            bit_depth = config.bit_depth(),
            "amplitude exceeds the bit depth's range; samples will wrap"
        );
    }

    let lengths: Vec<u64> = notes
        .iter()
        .map(|n| config.samples_from_secs_f64(n.seconds))
        .collect();
    let total = lengths
        .iter()
        .try_fold(0u64, |acc, &len| acc.checked_add(len))
        .context("Total length of the notes overflows the sample count")?;

    let mut buffer = match buffer_seconds {
        Some(seconds) => SampleBuffer::with_seconds(config, seconds)?,
        None => SampleBuffer::new(config, total)?,
    };

    let mut playhead = 0u64;
    for (note, &len) in notes.iter().zip(&lengths) {
        playhead += render_sine(&mut buffer, playhead, len, note.freq, amplitude)
            .with_context(|| format!("Failed to render {} Hz segment", note.freq))?;
    }

    pcmwav::write_file(output, &config, buffer.as_bytes(), playhead)?;

    println!(
        "{} {} ({} samples, {:.3}s, {}ch/{}Hz/{}-bit)",
        "Wrote".green().bold(),
        output,
        playhead,
        playhead as f64 / f64::from(config.sample_rate()),
        config.channels(),
        config.sample_rate(),
        config.bit_depth()
    );
    Ok(ExitCode::SUCCESS)
}
