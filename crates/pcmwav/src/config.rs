//! Audio layout configuration.
//!
//! An [`AudioConfig`] is validated once at construction and is immutable
//! afterwards; every codec and writer call takes it explicitly. Derived
//! quantities use 64-bit arithmetic so that durations up to `u32::MAX`
//! seconds at the highest supported rate cannot wrap.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Supported channel counts.
pub const SUPPORTED_CHANNELS: [u16; 2] = [1, 2];

/// Supported bit depths.
pub const SUPPORTED_BIT_DEPTHS: [u16; 4] = [8, 16, 24, 32];

/// Channel count, sample rate and bit depth of a PCM clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAudioConfig")]
pub struct AudioConfig {
    channels: u16,
    sample_rate: u32,
    bit_depth: u16,
}

/// Unvalidated wire form of [`AudioConfig`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAudioConfig {
    channels: u16,
    sample_rate: u32,
    bit_depth: u16,
}

impl TryFrom<RawAudioConfig> for AudioConfig {
    type Error = ConfigError;

    fn try_from(raw: RawAudioConfig) -> Result<Self, Self::Error> {
        AudioConfig::new(raw.channels, raw.sample_rate, raw.bit_depth)
    }
}

/// Validates the parameters and returns a configuration.
///
/// Equivalent to [`AudioConfig::new`].
pub fn configure(
    channels: u16,
    sample_rate: u32,
    bit_depth: u16,
) -> Result<AudioConfig, ConfigError> {
    AudioConfig::new(channels, sample_rate, bit_depth)
}

impl AudioConfig {
    /// Creates a validated configuration.
    ///
    /// Fields are checked in order (channels, sample rate, bit depth) and the
    /// first failure is reported. The sample rate is also rejected when
    /// `sample_rate * block_align` would not fit the 32-bit byte rate field.
    pub fn new(channels: u16, sample_rate: u32, bit_depth: u16) -> Result<Self, ConfigError> {
        if !SUPPORTED_CHANNELS.contains(&channels) {
            return Err(ConfigError::InvalidChannelCount { channels });
        }
        if sample_rate == 0 {
            return Err(ConfigError::InvalidSampleRate {
                rate: sample_rate,
                reason: "must be greater than zero",
            });
        }
        if !SUPPORTED_BIT_DEPTHS.contains(&bit_depth) {
            return Err(ConfigError::InvalidBitDepth { bits: bit_depth });
        }

        let block_align = u64::from(channels) * u64::from(bit_depth / 8);
        if u64::from(sample_rate) * block_align > u64::from(u32::MAX) {
            return Err(ConfigError::InvalidSampleRate {
                rate: sample_rate,
                reason: "byte rate exceeds 32 bits",
            });
        }

        Ok(Self {
            channels,
            sample_rate,
            bit_depth,
        })
    }

    /// Mono configuration at the given rate and depth.
    pub fn mono(sample_rate: u32, bit_depth: u16) -> Result<Self, ConfigError> {
        Self::new(1, sample_rate, bit_depth)
    }

    /// Stereo configuration at the given rate and depth.
    pub fn stereo(sample_rate: u32, bit_depth: u16) -> Result<Self, ConfigError> {
        Self::new(2, sample_rate, bit_depth)
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Bits per channel sample.
    pub fn bit_depth(&self) -> u16 {
        self.bit_depth
    }

    /// Bytes occupied by one channel of one sample.
    pub fn bytes_per_channel_sample(&self) -> u32 {
        u32::from(self.bit_depth / 8)
    }

    /// Bytes occupied by one time-aligned sample across all channels.
    pub fn bytes_per_sample(&self) -> u32 {
        u32::from(self.channels) * self.bytes_per_channel_sample()
    }

    /// Same as [`bytes_per_sample`](Self::bytes_per_sample), as the header's 16-bit field.
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bit_depth / 8)
    }

    /// Bytes of audio data per second of playback.
    pub fn byte_rate(&self) -> u32 {
        // Bounded by the check in `new`.
        self.sample_rate * u32::from(self.block_align())
    }

    /// Number of samples in `seconds` whole seconds.
    pub fn samples_from_seconds(&self, seconds: u32) -> u64 {
        u64::from(seconds) * u64::from(self.sample_rate)
    }

    /// Number of samples in a fractional duration, truncated toward zero.
    ///
    /// Negative and NaN durations yield zero.
    pub fn samples_from_secs_f64(&self, seconds: f64) -> u64 {
        (seconds * f64::from(self.sample_rate)) as u64
    }

    /// Bytes needed to hold `seconds` whole seconds.
    pub fn bytes_from_seconds(&self, seconds: u32) -> u64 {
        self.bytes_from_samples(self.samples_from_seconds(seconds))
    }

    /// Bytes needed to hold `samples` samples.
    ///
    /// Saturates at `u64::MAX` past `u64::MAX / bytes_per_sample` samples.
    /// Use [`checked_bytes_from_samples`](Self::checked_bytes_from_samples)
    /// when the result sizes an allocation or a header.
    pub fn bytes_from_samples(&self, samples: u64) -> u64 {
        samples.saturating_mul(u64::from(self.bytes_per_sample()))
    }

    /// Bytes needed to hold `samples` samples, or `None` on u64 overflow.
    pub fn checked_bytes_from_samples(&self, samples: u64) -> Option<u64> {
        samples.checked_mul(u64::from(self.bytes_per_sample()))
    }
}

impl Default for AudioConfig {
    /// Mono, 8000 Hz, 16-bit.
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 8000,
            bit_depth: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_configs() {
        for &channels in &SUPPORTED_CHANNELS {
            for &bits in &SUPPORTED_BIT_DEPTHS {
                let config = AudioConfig::new(channels, 44100, bits).unwrap();
                assert_eq!(config.bytes_per_sample(), u32::from(channels * bits / 8));
                assert_eq!(u32::from(config.block_align()), config.bytes_per_sample());
                assert_eq!(config.byte_rate(), 44100 * config.bytes_per_sample());
            }
        }
    }

    #[test]
    fn test_rejects_channels() {
        assert_eq!(
            configure(3, 44100, 16),
            Err(ConfigError::InvalidChannelCount { channels: 3 })
        );
        assert_eq!(
            configure(0, 44100, 16),
            Err(ConfigError::InvalidChannelCount { channels: 0 })
        );
    }

    #[test]
    fn test_rejects_bit_depth() {
        assert_eq!(
            configure(2, 44100, 20),
            Err(ConfigError::InvalidBitDepth { bits: 20 })
        );
        assert_eq!(
            configure(1, 44100, 0),
            Err(ConfigError::InvalidBitDepth { bits: 0 })
        );
    }

    #[test]
    fn test_rejects_sample_rate() {
        let err = configure(1, 0, 16).unwrap_err();
        assert_eq!(err.field(), "sample_rate");

        // 2 channels * 4 bytes * rate overflows u32
        let err = configure(2, u32::MAX / 4, 32).unwrap_err();
        assert_eq!(err.field(), "sample_rate");

        // Largest rate that still fits for mono 8-bit
        assert!(configure(1, u32::MAX, 8).is_ok());
    }

    #[test]
    fn test_derived_quantities() {
        let config = AudioConfig::stereo(44100, 24).unwrap();
        assert_eq!(config.bytes_per_sample(), 6);
        assert_eq!(config.samples_from_seconds(10), 441_000);
        assert_eq!(config.bytes_from_seconds(10), 2_646_000);
        assert_eq!(config.bytes_from_samples(100), 600);
        assert_eq!(config.samples_from_secs_f64(0.5), 22050);
        assert_eq!(config.samples_from_secs_f64(-1.0), 0);
    }

    #[test]
    fn test_no_wraparound_for_long_durations() {
        let config = AudioConfig::stereo(192_000, 32).unwrap();
        // Would wrap in 32-bit arithmetic
        assert_eq!(config.bytes_from_seconds(3600), 3600 * 192_000 * 8);
    }

    #[test]
    fn test_byte_count_overflow_boundary() {
        let config = AudioConfig::stereo(44100, 32).unwrap();
        let last = u64::MAX / 8;
        assert_eq!(config.checked_bytes_from_samples(last), Some(last * 8));
        assert_eq!(config.checked_bytes_from_samples(last + 1), None);
        assert_eq!(config.checked_bytes_from_samples(1 << 61), None);
        assert_eq!(config.bytes_from_samples(1 << 61), u64::MAX);

        // Whole seconds never reach the boundary: rate * block_align fits u32.
        assert!(config.checked_bytes_from_samples(config.samples_from_seconds(u32::MAX)).is_some());
    }

    #[test]
    fn test_default_matches_historical_context() {
        let config = AudioConfig::default();
        assert_eq!(config.channels(), 1);
        assert_eq!(config.sample_rate(), 8000);
        assert_eq!(config.bit_depth(), 16);
    }

    #[test]
    fn test_serde_validates() {
        let config: AudioConfig =
            serde_json::from_str(r#"{"channels":2,"sample_rate":48000,"bit_depth":24}"#).unwrap();
        assert_eq!(config, AudioConfig::stereo(48000, 24).unwrap());

        let json = serde_json::to_string(&config).unwrap();
        let back: AudioConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let err = serde_json::from_str::<AudioConfig>(
            r#"{"channels":2,"sample_rate":48000,"bit_depth":12}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("bit depth"));
    }
}
