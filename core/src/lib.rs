//! Sculptor Core Types
//!
//! This crate provides the foundational types shared by the Sculptor crates:
//! - Host runtime values (the `Value` enum) that edits carry as defaults,
//!   constant values and collection entries
//! - Named parameter maps (`Params`) carried by queued modification descriptors

mod params;
mod value;

pub use params::*;
pub use value::*;
