//! Error types for configuration, encoding and container I/O.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for codec and writer operations.
pub type WavResult<T> = Result<T, WavError>;

/// Errors raised while validating an [`AudioConfig`](crate::AudioConfig).
///
/// These are recoverable: the caller may retry with corrected parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Channel count outside {1, 2}.
    #[error("invalid channel count: {channels} (expected 1 or 2)")]
    InvalidChannelCount {
        /// The rejected channel count.
        channels: u16,
    },

    /// Sample rate of zero, or one whose byte rate overflows the header field.
    #[error("invalid sample rate: {rate} Hz ({reason})")]
    InvalidSampleRate {
        /// The rejected sample rate.
        rate: u32,
        /// Why the rate was rejected.
        reason: &'static str,
    },

    /// Bit depth outside {8, 16, 24, 32}.
    #[error("invalid bit depth: {bits} (expected 8, 16, 24 or 32)")]
    InvalidBitDepth {
        /// The rejected bit depth.
        bits: u16,
    },
}

impl ConfigError {
    /// Name of the configuration field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::InvalidChannelCount { .. } => "channels",
            ConfigError::InvalidSampleRate { .. } => "sample_rate",
            ConfigError::InvalidBitDepth { .. } => "bit_depth",
        }
    }
}

/// Errors that can occur while packing samples or writing a WAV container.
#[derive(Debug, Error)]
pub enum WavError {
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An operation needed a configuration before one was set.
    #[error("no audio configuration set; call configure first")]
    NotConfigured,

    /// Sample position lies beyond the buffer's capacity.
    #[error("sample position {position} out of range (buffer holds {capacity} samples)")]
    PositionOutOfRange {
        /// Requested sample position.
        position: u64,
        /// Number of whole samples the buffer can hold.
        capacity: u64,
    },

    /// Channel index is not below the configured channel count.
    #[error("channel {channel} out of range ({channels} channels configured)")]
    ChannelOutOfRange {
        /// Requested channel index.
        channel: u16,
        /// Configured channel count.
        channels: u16,
    },

    /// Buffer holds fewer bytes than the requested sample count needs.
    #[error("buffer too small: {required} bytes required, {actual} available")]
    BufferTooSmall {
        /// Bytes needed.
        required: u64,
        /// Bytes present.
        actual: u64,
    },

    /// PCM payload does not fit the 32-bit RIFF size fields, or a buffer
    /// for it does not fit memory.
    #[error("{samples} samples of {block_align} bytes each exceed the size limit")]
    DataTooLarge {
        /// Requested sample count.
        samples: u64,
        /// Bytes per sample under the active configuration.
        block_align: u16,
    },

    /// Target file could not be opened for writing.
    #[error("failed to open {}: {source}", .path.display())]
    FileOpenFailed {
        /// Target path.
        path: PathBuf,
        /// OS-level cause.
        #[source]
        source: io::Error,
    },

    /// Header or data could not be written to an open file.
    #[error("failed to write {}: {source}", .path.display())]
    FileWriteFailed {
        /// Target path.
        path: PathBuf,
        /// OS-level cause.
        #[source]
        source: io::Error,
    },

    /// Bytes being read back do not hold a canonical 44-byte PCM header.
    #[error("invalid WAV header at offset {offset}: {message}")]
    InvalidHeader {
        /// Byte offset of the offending field.
        offset: usize,
        /// Error message.
        message: String,
    },
}

impl WavError {
    /// Creates an invalid header error.
    pub fn invalid_header(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            offset,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            WavError::Config(ConfigError::InvalidChannelCount { .. }) => "WAV_001",
            WavError::Config(ConfigError::InvalidSampleRate { .. }) => "WAV_002",
            WavError::Config(ConfigError::InvalidBitDepth { .. }) => "WAV_003",
            WavError::NotConfigured => "WAV_004",
            WavError::PositionOutOfRange { .. } => "WAV_005",
            WavError::BufferTooSmall { .. } => "WAV_006",
            WavError::DataTooLarge { .. } => "WAV_007",
            WavError::FileOpenFailed { .. } => "WAV_008",
            WavError::FileWriteFailed { .. } => "WAV_009",
            WavError::InvalidHeader { .. } => "WAV_010",
            WavError::ChannelOutOfRange { .. } => "WAV_011",
        }
    }
}
