//! Container emission: header followed by the PCM payload.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::AudioConfig;
use crate::error::{WavError, WavResult};

use super::header::{build_header, WavHeader, HEADER_SIZE};

/// Builds the header and selects the exact payload for `sample_count` frames.
///
/// # Returns
/// The header and the first `data_size` bytes of `buffer`
pub fn prepare<'a>(
    config: &AudioConfig,
    buffer: &'a [u8],
    sample_count: u64,
) -> WavResult<(WavHeader, &'a [u8])> {
    let header = build_header(config, sample_count)?;
    let required = u64::from(header.data_size);
    if (buffer.len() as u64) < required {
        return Err(WavError::BufferTooSmall {
            required,
            actual: buffer.len() as u64,
        });
    }
    Ok((header, &buffer[..header.data_size as usize]))
}

/// Writes a header and its payload to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `header` - Header describing `pcm_data`
/// * `pcm_data` - Interleaved PCM bytes, exactly `header.data_size` long
pub fn write_wav<W: Write>(writer: &mut W, header: &WavHeader, pcm_data: &[u8]) -> io::Result<()> {
    header.write(writer)?;
    writer.write_all(pcm_data)?;
    Ok(())
}

/// Encodes a complete WAV file in memory.
pub fn encode_to_vec(config: &AudioConfig, buffer: &[u8], sample_count: u64) -> WavResult<Vec<u8>> {
    let (header, pcm) = prepare(config, buffer, sample_count)?;
    let mut out = Vec::with_capacity(HEADER_SIZE + pcm.len());
    write_wav(&mut out, &header, pcm).expect("writing to Vec should not fail");
    Ok(out)
}

/// Writes `sample_count` frames of `buffer` to `path` as a WAV file.
///
/// The file is created or truncated. Open failures and write failures are
/// reported separately, each with the OS cause attached. The handle is
/// released on every path; a failed write may leave a partial file behind.
pub fn write_file(
    path: impl AsRef<Path>,
    config: &AudioConfig,
    buffer: &[u8],
    sample_count: u64,
) -> WavResult<()> {
    let path = path.as_ref();
    let (header, pcm) = prepare(config, buffer, sample_count)?;

    let file = File::create(path).map_err(|source| WavError::FileOpenFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    write_wav(&mut writer, &header, pcm)
        .and_then(|()| writer.flush())
        .map_err(|source| WavError::FileWriteFailed {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        path = %path.display(),
        samples = sample_count,
        data_size = header.data_size,
        "wrote WAV file"
    );
    Ok(())
}
