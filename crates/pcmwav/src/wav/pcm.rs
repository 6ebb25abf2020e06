//! PCM data extraction and hashing utilities.

/// Extracts the `data` chunk payload from a WAV file buffer.
///
/// Walks the RIFF chunk list, so files with extra chunks before `data`
/// are handled too.
///
/// # Returns
/// PCM data if found, or None if the format is invalid or truncated
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 12 {
        return None;
    }
    if &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12usize;
    while pos.checked_add(8)? <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = u32::from_le_bytes([
            wav_data[pos + 4],
            wav_data[pos + 5],
            wav_data[pos + 6],
            wav_data[pos + 7],
        ]) as usize;

        let body_start = pos + 8;
        let body_end = body_start.checked_add(chunk_size)?;
        if chunk_id == b"data" {
            return wav_data.get(body_start..body_end);
        }

        // Chunks are word-aligned
        pos = body_end.checked_add(chunk_size & 1)?;
    }

    None
}

/// BLAKE3 hex digest of raw PCM bytes.
pub fn hash_pcm(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}

/// Computes the PCM hash of a WAV file, ignoring header fields.
///
/// # Returns
/// BLAKE3 hash of the data chunk, or None if no data chunk is found
pub fn pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(hash_pcm)
}
