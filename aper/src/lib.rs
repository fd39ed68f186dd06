//! aper_rs - ASN.1 PER-ALIGNED (ITU-T X.691) encoding
//!
//! This library encodes in-memory ASN.1 values to the aligned variant of the
//! Packed Encoding Rules, driven by per-field constraint parameters.
//!
//! # Architecture
//!
//! The library is organized as a workspace with multiple crates:
//!
//! - `aper-core`: value model, field parameters, error handling
//! - `aper-codec`: the PER-ALIGNED bit writer and encoder
//!
//! # Usage
//!
//! ```rust
//! use aper::{encode_with_params, AsnValue, FieldParameters};
//!
//! let params = FieldParameters::value_range(0, 7);
//! let bytes = encode_with_params(&AsnValue::Integer(5), &params)?;
//! assert_eq!(bytes, vec![0xA0]);
//! # Ok::<(), aper::AperError>(())
//! ```

// Re-export core types
pub use aper_core::{AperError, AperResult, AsnValue, BitString, Choice, Field, FieldParameters};

// Re-export the encoder API
pub use aper_codec::{encode, encode_with_params, BitWriter, PerEncoder};

// Full codec module for callers that want the constants as well
pub mod per {
    pub use aper_codec::per::*;
}
