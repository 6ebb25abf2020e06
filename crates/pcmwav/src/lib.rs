//! pcmwav - PCM sample packing and RIFF/WAVE output
//!
//! This crate packs integer audio samples into interleaved little-endian
//! byte buffers for a given channel count and bit depth, and writes the
//! result as a canonical 44-byte-header WAV file.
//!
//! # Example
//!
//! ```no_run
//! use pcmwav::{AudioConfig, SampleBuffer};
//!
//! let config = AudioConfig::new(2, 44100, 24)?;
//! let mut buffer = SampleBuffer::with_seconds(config, 1)?;
//! for i in 0..buffer.capacity() {
//!     buffer.write_sample(i, (i as i32) * 64)?;
//! }
//! pcmwav::write_file("out.wav", &config, buffer.as_bytes(), buffer.capacity())?;
//! # Ok::<(), pcmwav::WavError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`config`] - Validated channel/rate/depth configuration and derived sizes
//! - [`codec`] - Bounds-checked sample packing into caller buffers
//! - [`wav`] - Header construction, container writing and read-back
//! - [`context`] - Stateful configure-then-encode context
//! - [`error`] - Error types

pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod wav;

// Re-export main types at crate root
pub use codec::{read_sample, write_sample, SampleBuffer};
pub use config::{configure, AudioConfig};
pub use context::WavContext;
pub use error::{ConfigError, WavError, WavResult};
pub use wav::{build_header, encode_to_vec, write_file, WavHeader};
