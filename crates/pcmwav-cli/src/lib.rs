//! pcmwav CLI library.
//!
//! Shared argument handling and the command implementations behind the
//! `pcmwav` binary.

pub mod audio_config;
pub mod commands;
