//! Stateful encoder context with explicit configured/unconfigured states.
//!
//! [`WavContext`] mirrors the classic "init once, then encode" workflow
//! without any process-wide state: each context owns its configuration, so
//! several contexts with different layouts can be used side by side.

use std::path::Path;

use crate::codec;
use crate::config::AudioConfig;
use crate::error::{ConfigError, WavError, WavResult};
use crate::wav;

/// Encoder context holding an optional active configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WavContext {
    config: Option<AudioConfig>,
}

impl WavContext {
    /// Creates an unconfigured context.
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Creates a context already holding `config`.
    pub fn with_config(config: AudioConfig) -> Self {
        Self {
            config: Some(config),
        }
    }

    /// Validates and installs a new configuration.
    ///
    /// On failure the previous configuration (or the unconfigured state) is
    /// kept unchanged.
    pub fn configure(
        &mut self,
        channels: u16,
        sample_rate: u32,
        bit_depth: u16,
    ) -> Result<AudioConfig, ConfigError> {
        match AudioConfig::new(channels, sample_rate, bit_depth) {
            Ok(config) => {
                tracing::debug!(channels, sample_rate, bit_depth, "configured WAV context");
                self.config = Some(config);
                Ok(config)
            }
            Err(e) => {
                tracing::warn!(field = e.field(), "rejected WAV configuration: {}", e);
                Err(e)
            }
        }
    }

    /// Whether a configuration has been installed.
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Active configuration.
    pub fn config(&self) -> WavResult<&AudioConfig> {
        self.config.as_ref().ok_or(WavError::NotConfigured)
    }

    /// See [`codec::write_sample`].
    pub fn write_sample(&self, buffer: &mut [u8], position: u64, sample: i32) -> WavResult<()> {
        codec::write_sample(buffer, self.config()?, position, sample)
    }

    /// See [`wav::write_file`].
    pub fn write_file(
        &self,
        path: impl AsRef<Path>,
        buffer: &[u8],
        sample_count: u64,
    ) -> WavResult<()> {
        wav::write_file(path, self.config()?, buffer, sample_count)
    }

    /// Bytes needed for `samples` frames under the active configuration.
    ///
    /// Fails with [`WavError::DataTooLarge`] when the count overflows u64.
    pub fn bytes_from_samples(&self, samples: u64) -> WavResult<u64> {
        let config = self.config()?;
        config
            .checked_bytes_from_samples(samples)
            .ok_or(WavError::DataTooLarge {
                samples,
                block_align: config.block_align(),
            })
    }

    /// Frames in `seconds` whole seconds under the active configuration.
    pub fn samples_from_seconds(&self, seconds: u32) -> WavResult<u64> {
        Ok(self.config()?.samples_from_seconds(seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unconfigured_operations_fail() {
        let ctx = WavContext::new();
        assert!(!ctx.is_configured());

        let mut buf = vec![0u8; 4];
        let err = ctx.write_sample(&mut buf, 0, 1).unwrap_err();
        assert!(matches!(err, WavError::NotConfigured));
        assert!(matches!(ctx.bytes_from_samples(1), Err(WavError::NotConfigured)));
        assert_eq!(buf, vec![0u8; 4]);
    }

    #[test]
    fn test_failed_reconfigure_keeps_previous() {
        let mut ctx = WavContext::new();
        let first = ctx.configure(2, 44100, 16).unwrap();

        assert_eq!(
            ctx.configure(3, 44100, 16),
            Err(ConfigError::InvalidChannelCount { channels: 3 })
        );
        assert_eq!(
            ctx.configure(2, 44100, 20),
            Err(ConfigError::InvalidBitDepth { bits: 20 })
        );
        assert_eq!(ctx.config().unwrap(), &first);
    }

    #[test]
    fn test_failed_first_configure_stays_unconfigured() {
        let mut ctx = WavContext::new();
        assert!(ctx.configure(1, 0, 16).is_err());
        assert!(!ctx.is_configured());
    }

    #[test]
    fn test_contexts_are_independent() {
        let mono = WavContext::with_config(AudioConfig::mono(8000, 8).unwrap());
        let stereo = WavContext::with_config(AudioConfig::stereo(48000, 32).unwrap());

        assert_eq!(mono.bytes_from_samples(10).unwrap(), 10);
        assert_eq!(stereo.bytes_from_samples(10).unwrap(), 80);
        assert_eq!(stereo.samples_from_seconds(2).unwrap(), 96_000);
    }

    #[test]
    fn test_byte_count_overflow_is_an_error() {
        let ctx = WavContext::with_config(AudioConfig::stereo(44100, 32).unwrap());
        let err = ctx.bytes_from_samples(1 << 61).unwrap_err();
        assert_eq!(err.code(), "WAV_007");
    }
}
