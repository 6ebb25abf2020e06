//! Deterministic RIFF/WAVE container writer.
//!
//! Files always carry the canonical 44-byte header (`RIFF`, `fmt `, `data`
//! in that order) with no optional chunks, so identical input produces
//! byte-identical output.

mod header;
mod pcm;
mod writer;


pub use header::{
    build_header, WavHeader, FMT_CHUNK_SIZE, FORMAT_PCM, HEADER_SIZE, MAX_DATA_SIZE,
    RIFF_SIZE_OFFSET,
};
pub use pcm::{extract_pcm_data, hash_pcm, pcm_hash};
pub use writer::{encode_to_vec, prepare, write_file, write_wav};
