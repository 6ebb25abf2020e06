//! Sample packing into interleaved little-endian PCM buffers.
//!
//! One call to [`write_sample`] fills one time-aligned frame: the same value
//! is written to every channel, so a stereo frame holds a duplicated mono
//! source. Each channel takes the low `bit_depth / 8` bytes of the `i32`
//! sample in little-endian order; wider values are truncated, never clamped.
//!
//! Frame `p` starts at byte `p * channels * width` and channel `c` of that
//! frame at `p * channels * width + c * width`.

use std::ops::Range;

use crate::config::AudioConfig;
use crate::error::{WavError, WavResult};

/// Number of whole frames a buffer of `len` bytes can hold.
pub fn capacity_in_samples(config: &AudioConfig, len: usize) -> u64 {
    (len / config.bytes_per_sample() as usize) as u64
}

/// Byte range of frame `position`, checked against the buffer length.
fn frame_range(config: &AudioConfig, len: usize, position: u64) -> WavResult<Range<usize>> {
    let capacity = capacity_in_samples(config, len);
    if position >= capacity {
        return Err(WavError::PositionOutOfRange { position, capacity });
    }
    // position < capacity <= len, so it fits usize.
    let frame = config.bytes_per_sample() as usize;
    let start = position as usize * frame;
    Ok(start..start + frame)
}

/// Writes `sample` into every channel of frame `position`.
///
/// Fails with [`WavError::PositionOutOfRange`] when the frame does not lie
/// wholly inside `buffer`; the buffer is left untouched in that case.
pub fn write_sample(
    buffer: &mut [u8],
    config: &AudioConfig,
    position: u64,
    sample: i32,
) -> WavResult<()> {
    let range = frame_range(config, buffer.len(), position)?;
    let width = config.bytes_per_channel_sample() as usize;
    let bytes = sample.to_le_bytes();

    for slot in buffer[range].chunks_exact_mut(width) {
        slot.copy_from_slice(&bytes[..width]);
    }

    Ok(())
}

/// Reads one channel of frame `position` back as a sign-extended `i32`.
///
/// For values that fit the configured bit depth this is the inverse of
/// [`write_sample`].
pub fn read_sample(
    buffer: &[u8],
    config: &AudioConfig,
    position: u64,
    channel: u16,
) -> WavResult<i32> {
    if channel >= config.channels() {
        return Err(WavError::ChannelOutOfRange {
            channel,
            channels: config.channels(),
        });
    }
    let range = frame_range(config, buffer.len(), position)?;
    let width = config.bytes_per_channel_sample() as usize;
    let start = range.start + usize::from(channel) * width;

    let mut bytes = [0u8; 4];
    bytes[..width].copy_from_slice(&buffer[start..start + width]);
    let shift = 32 - 8 * width as u32;
    Ok((i32::from_le_bytes(bytes) << shift) >> shift)
}

/// Owned PCM buffer sized for an exact number of frames.
///
/// The buffer is bound to the configuration it was sized for, so writes can
/// never disagree with the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    config: AudioConfig,
    data: Vec<u8>,
}

impl SampleBuffer {
    /// Allocates a zeroed buffer holding `samples` frames.
    ///
    /// Fails with [`WavError::DataTooLarge`] when the byte count overflows
    /// or exceeds the largest possible allocation.
    pub fn new(config: AudioConfig, samples: u64) -> WavResult<Self> {
        let len = config
            .checked_bytes_from_samples(samples)
            .and_then(|bytes| usize::try_from(bytes).ok())
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(WavError::DataTooLarge {
                samples,
                block_align: config.block_align(),
            })?;
        Ok(Self {
            config,
            data: vec![0; len],
        })
    }

    /// Allocates a zeroed buffer holding `seconds` whole seconds.
    pub fn with_seconds(config: AudioConfig, seconds: u32) -> WavResult<Self> {
        Self::new(config, config.samples_from_seconds(seconds))
    }

    /// Layout this buffer was sized for.
    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    /// Number of frames the buffer holds.
    pub fn capacity(&self) -> u64 {
        capacity_in_samples(&self.config, self.data.len())
    }

    /// See [`write_sample`].
    pub fn write_sample(&mut self, position: u64, sample: i32) -> WavResult<()> {
        write_sample(&mut self.data, &self.config, position, sample)
    }

    /// See [`read_sample`].
    pub fn read_sample(&self, position: u64, channel: u16) -> WavResult<i32> {
        read_sample(&self.data, &self.config, position, channel)
    }

    /// Raw interleaved PCM bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer, returning the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
