//! CLI command implementations

pub mod inspect;
pub mod ramp;
pub mod tone;
