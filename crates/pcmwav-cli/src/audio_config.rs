//! Resolves the audio layout from command-line flags or a JSON file.

use anyhow::{Context, Result};
use pcmwav::AudioConfig;
use std::fs;
use std::path::Path;

/// Default channel count for synthesized clips.
pub const DEFAULT_CHANNELS: u16 = 2;
/// Default sample rate for synthesized clips.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// Default bit depth for synthesized clips.
pub const DEFAULT_BIT_DEPTH: u16 = 24;

/// Builds the configuration for a command.
///
/// A config file, when given, takes precedence over the individual flags.
///
/// # Arguments
/// * `channels` - Channel count flag
/// * `sample_rate` - Sample rate flag
/// * `bit_depth` - Bit depth flag
/// * `config_path` - Optional JSON file holding `channels`, `sample_rate` and `bit_depth`
pub fn resolve(
    channels: u16,
    sample_rate: u32,
    bit_depth: u16,
    config_path: Option<&str>,
) -> Result<AudioConfig> {
    if let Some(path) = config_path {
        return load(Path::new(path));
    }
    AudioConfig::new(channels, sample_rate, bit_depth).context("Invalid audio configuration")
}

/// Loads and validates a JSON audio configuration file.
pub fn load(path: &Path) -> Result<AudioConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: AudioConfig = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?config, "loaded audio config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_from_flags() {
        let config = resolve(1, 8000, 16, None).unwrap();
        assert_eq!(config, AudioConfig::mono(8000, 16).unwrap());
    }

    #[test]
    fn test_resolve_rejects_bad_flags() {
        let err = resolve(3, 44100, 16, None).unwrap_err();
        assert!(format!("{err:#}").contains("channel count"));
    }

    #[test]
    fn test_config_file_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audio.json");
        fs::write(&path, r#"{"channels":1,"sample_rate":22050,"bit_depth":8}"#).unwrap();

        let config = resolve(2, 44100, 24, path.to_str()).unwrap();
        assert_eq!(config, AudioConfig::mono(22050, 8).unwrap());
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audio.json");
        fs::write(&path, r#"{"channels":2,"sample_rate":0,"bit_depth":16}"#).unwrap();

        let err = load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("sample rate"));
    }
}
