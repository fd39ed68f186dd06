//! Core types for the aper_rs PER-ALIGNED codec
//!
//! This crate provides the value model, per-field constraint parameters and
//! error handling shared by the codec crates. It contains no encoding logic;
//! see `aper-codec` for the PER-ALIGNED encoder itself.

pub mod error;
pub mod params;
pub mod datatypes;

pub use error::{AperError, AperResult};
pub use params::FieldParameters;
pub use datatypes::{AsnValue, BitString, Choice, Field};
