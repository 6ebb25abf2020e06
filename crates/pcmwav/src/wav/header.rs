//! The canonical 44-byte RIFF/WAVE PCM header.

use std::io::{self, Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::config::AudioConfig;
use crate::error::{WavError, WavResult};

/// Total header size in bytes.
pub const HEADER_SIZE: usize = 44;

/// Bytes counted by `file_size`: everything after the RIFF tag and size field.
pub const RIFF_SIZE_OFFSET: u32 = HEADER_SIZE as u32 - 8;

/// Size of the PCM `fmt ` chunk body.
pub const FMT_CHUNK_SIZE: u32 = 16;

/// Format tag for integer PCM.
pub const FORMAT_PCM: u16 = 1;

/// Largest PCM payload whose `file_size` still fits 32 bits.
pub const MAX_DATA_SIZE: u64 = (u32::MAX - RIFF_SIZE_OFFSET) as u64;

/// Field-by-field view of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub riff: [u8; 4],
    pub file_size: u32,
    pub description: [u8; 4],
    pub fmt: [u8; 4],
    pub chunk_size: u32,
    pub format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_header: [u8; 4],
    pub data_size: u32,
}

/// Builds the header for `sample_count` frames under `config`.
///
/// Fails with [`WavError::DataTooLarge`] when the payload would overflow the
/// 32-bit size fields.
pub fn build_header(config: &AudioConfig, sample_count: u64) -> WavResult<WavHeader> {
    let data_size = config
        .checked_bytes_from_samples(sample_count)
        .filter(|&bytes| bytes <= MAX_DATA_SIZE)
        .ok_or(WavError::DataTooLarge {
            samples: sample_count,
            block_align: config.block_align(),
        })? as u32;

    Ok(WavHeader {
        riff: *b"RIFF",
        file_size: data_size + RIFF_SIZE_OFFSET,
        description: *b"WAVE",
        fmt: *b"fmt ",
        chunk_size: FMT_CHUNK_SIZE,
        format: FORMAT_PCM,
        channels: config.channels(),
        sample_rate: config.sample_rate(),
        byte_rate: config.byte_rate(),
        block_align: config.block_align(),
        bits_per_sample: config.bit_depth(),
        data_header: *b"data",
        data_size,
    })
}

impl WavHeader {
    /// Writes the 44 header bytes.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        // RIFF chunk
        writer.write_all(&self.riff)?;
        writer.write_u32::<LittleEndian>(self.file_size)?;
        writer.write_all(&self.description)?;

        // fmt chunk
        writer.write_all(&self.fmt)?;
        writer.write_u32::<LittleEndian>(self.chunk_size)?;
        writer.write_u16::<LittleEndian>(self.format)?;
        writer.write_u16::<LittleEndian>(self.channels)?;
        writer.write_u32::<LittleEndian>(self.sample_rate)?;
        writer.write_u32::<LittleEndian>(self.byte_rate)?;
        writer.write_u16::<LittleEndian>(self.block_align)?;
        writer.write_u16::<LittleEndian>(self.bits_per_sample)?;

        // data chunk header
        writer.write_all(&self.data_header)?;
        writer.write_u32::<LittleEndian>(self.data_size)?;

        Ok(())
    }

    /// Header as a fixed byte array.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut cursor = Cursor::new([0u8; HEADER_SIZE]);
        self.write(&mut cursor).expect("header fills exactly HEADER_SIZE bytes");
        cursor.into_inner()
    }

    /// Parses and validates the canonical header at the start of `data`.
    ///
    /// Only the fixed layout this crate emits is accepted: `fmt ` must
    /// directly follow `WAVE` with a 16-byte PCM body, and `data` must
    /// follow at offset 36.
    pub fn parse(data: &[u8]) -> WavResult<Self> {
        if data.len() < HEADER_SIZE {
            return Err(WavError::invalid_header(
                0,
                format!("file too short: {} bytes (minimum {HEADER_SIZE})", data.len()),
            ));
        }

        let mut cursor = Cursor::new(&data[..HEADER_SIZE]);
        let header =
            Self::read_fields(&mut cursor).map_err(|e| WavError::invalid_header(0, e.to_string()))?;

        expect_tag(&header.riff, b"RIFF", 0)?;
        expect_tag(&header.description, b"WAVE", 8)?;
        expect_tag(&header.fmt, b"fmt ", 12)?;
        expect_tag(&header.data_header, b"data", 36)?;

        if header.chunk_size != FMT_CHUNK_SIZE {
            return Err(WavError::invalid_header(
                16,
                format!("fmt chunk size {} (expected {FMT_CHUNK_SIZE})", header.chunk_size),
            ));
        }
        if header.format != FORMAT_PCM {
            return Err(WavError::invalid_header(
                20,
                format!("format tag {} is not integer PCM", header.format),
            ));
        }

        let config = header.config()?;
        if header.block_align != config.block_align() {
            return Err(WavError::invalid_header(
                32,
                format!("block align {} (expected {})", header.block_align, config.block_align()),
            ));
        }
        if header.byte_rate != config.byte_rate() {
            return Err(WavError::invalid_header(
                28,
                format!("byte rate {} (expected {})", header.byte_rate, config.byte_rate()),
            ));
        }

        Ok(header)
    }

    fn read_fields<R: Read>(reader: &mut R) -> io::Result<Self> {
        let riff = read_tag(reader)?;
        let file_size = reader.read_u32::<LittleEndian>()?;
        let description = read_tag(reader)?;
        let fmt = read_tag(reader)?;
        let chunk_size = reader.read_u32::<LittleEndian>()?;
        let format = reader.read_u16::<LittleEndian>()?;
        let channels = reader.read_u16::<LittleEndian>()?;
        let sample_rate = reader.read_u32::<LittleEndian>()?;
        let byte_rate = reader.read_u32::<LittleEndian>()?;
        let block_align = reader.read_u16::<LittleEndian>()?;
        let bits_per_sample = reader.read_u16::<LittleEndian>()?;
        let data_header = read_tag(reader)?;
        let data_size = reader.read_u32::<LittleEndian>()?;

        Ok(Self {
            riff,
            file_size,
            description,
            fmt,
            chunk_size,
            format,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
            data_header,
            data_size,
        })
    }

    /// Configuration described by the fmt fields.
    pub fn config(&self) -> WavResult<AudioConfig> {
        Ok(AudioConfig::new(self.channels, self.sample_rate, self.bits_per_sample)?)
    }

    /// Number of frames announced by `data_size`.
    pub fn sample_count(&self) -> u64 {
        if self.block_align == 0 {
            return 0;
        }
        u64::from(self.data_size / u32::from(self.block_align))
    }

    /// Playback length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.sample_count() as f64 / f64::from(self.sample_rate)
    }
}

fn read_tag<R: Read>(reader: &mut R) -> io::Result<[u8; 4]> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

fn expect_tag(found: &[u8; 4], expected: &[u8; 4], offset: usize) -> WavResult<()> {
    if found != expected {
        return Err(WavError::invalid_header(
            offset,
            format!(
                "expected '{}', got {:?}",
                String::from_utf8_lossy(expected),
                found
            ),
        ));
    }
    Ok(())
}
