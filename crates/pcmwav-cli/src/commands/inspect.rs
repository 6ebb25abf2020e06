//! Inspect command implementation
//!
//! Parses a WAV header and reports its fields, duration and PCM hash.

use anyhow::{Context, Result};
use colored::Colorize;
use pcmwav::wav::{extract_pcm_data, hash_pcm};
use pcmwav::WavHeader;
use serde::Serialize;
use std::fs;
use std::process::ExitCode;

/// Machine-readable summary of a WAV file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectOutput {
    pub path: String,
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub byte_rate: u32,
    pub block_align: u16,
    pub file_size: u32,
    pub data_size: u32,
    pub samples: u64,
    pub duration_seconds: f64,
    /// BLAKE3 hash of the data chunk
    pub pcm_hash: String,
    /// Whether the data chunk holds at least `data_size` bytes
    pub complete: bool,
}

/// Reads `path` and summarizes its header.
pub fn inspect_file(path: &str) -> Result<InspectOutput> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read file: {}", path))?;
    let header =
        WavHeader::parse(&bytes).with_context(|| format!("Not a canonical PCM WAV file: {}", path))?;

    // Hash whatever payload is present, even if the file was cut short.
    let (pcm, complete) = match extract_pcm_data(&bytes) {
        Some(pcm) => (pcm, true),
        None => (&bytes[pcmwav::wav::HEADER_SIZE..], false),
    };

    Ok(InspectOutput {
        path: path.to_string(),
        channels: header.channels,
        sample_rate: header.sample_rate,
        bits_per_sample: header.bits_per_sample,
        byte_rate: header.byte_rate,
        block_align: header.block_align,
        file_size: header.file_size,
        data_size: header.data_size,
        samples: header.sample_count(),
        duration_seconds: header.duration_seconds(),
        pcm_hash: hash_pcm(pcm),
        complete,
    })
}

/// Run the inspect command
///
/// # Arguments
/// * `path` - WAV file to inspect
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if the file is complete, 1 if its data chunk is truncated
pub fn run(path: &str, json_output: bool) -> Result<ExitCode> {
    let info = inspect_file(path)?;

    if json_output {
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        print_human(&info);
    }

    Ok(if info.complete {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_human(info: &InspectOutput) {
    println!("{} {}", "File:".cyan().bold(), info.path);
    println!(
        "  {} {} ch, {} Hz, {}-bit PCM",
        "Format:".dimmed(),
        info.channels,
        info.sample_rate,
        info.bits_per_sample
    );
    println!(
        "  {} {} bytes/s, block align {}",
        "Rate:".dimmed(),
        info.byte_rate,
        info.block_align
    );
    println!(
        "  {} {} samples ({:.3}s), {} data bytes",
        "Length:".dimmed(),
        info.samples,
        info.duration_seconds,
        info.data_size
    );
    println!("  {} {}", "PCM hash:".dimmed(), info.pcm_hash);
    if !info.complete {
        println!(
            "  {} data chunk is shorter than its declared size",
            "warning:".yellow().bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcmwav::{AudioConfig, SampleBuffer};
    use pretty_assertions::assert_eq;

    fn write_clip(path: &std::path::Path, samples: u64) -> Vec<u8> {
        let config = AudioConfig::stereo(8000, 16).unwrap();
        let mut buffer = SampleBuffer::new(config, samples).unwrap();
        for i in 0..samples {
            buffer.write_sample(i, i as i32).unwrap();
        }
        pcmwav::write_file(path, &config, buffer.as_bytes(), samples).unwrap();
        buffer.into_bytes()
    }

    #[test]
    fn test_inspect_reports_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        let pcm = write_clip(&path, 4000);

        let info = inspect_file(path.to_str().unwrap()).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.sample_rate, 8000);
        assert_eq!(info.block_align, 4);
        assert_eq!(info.data_size, 16_000);
        assert_eq!(info.file_size, 16_036);
        assert_eq!(info.samples, 4000);
        assert_eq!(info.duration_seconds, 0.5);
        assert_eq!(info.pcm_hash, hash_pcm(&pcm));
        assert!(info.complete);
    }

    #[test]
    fn test_inspect_flags_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        write_clip(&path, 100);

        let mut bytes = fs::read(&path).unwrap();
        bytes.truncate(bytes.len() - 10);
        fs::write(&path, &bytes).unwrap();

        let info = inspect_file(path.to_str().unwrap()).unwrap();
        assert!(!info.complete);
        assert_eq!(run(path.to_str().unwrap(), true).unwrap(), ExitCode::from(1));
    }

    #[test]
    fn test_inspect_rejects_non_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"not a wav file at all, just some text padding it out").unwrap();

        let err = inspect_file(path.to_str().unwrap()).unwrap_err();
        assert!(format!("{err:#}").contains("RIFF"));
    }
}
