//! Error surface of the codec crate
//!
//! The codec shares the error type defined in `aper-core` so that values,
//! constraints and encodings fail through one enum.

pub use aper_core::error::{AperError, AperResult};
