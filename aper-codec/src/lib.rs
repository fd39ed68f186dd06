//! PER-ALIGNED (ITU-T X.691) encoding for ASN.1 value trees
//!
//! This crate provides the aligned-PER encoder: a bit-level output buffer
//! and a constraint-driven recursive encoder over the value model defined
//! in `aper-core`.
//!
//! # Usage Example
//!
//! ```rust
//! use aper_codec::per::encode_with_params;
//! use aper_core::{AsnValue, FieldParameters};
//!
//! let params = FieldParameters::value_range(0, 7);
//! let bytes = encode_with_params(&AsnValue::Integer(5), &params)?;
//! assert_eq!(bytes, vec![0xA0]);
//! # Ok::<(), aper_core::AperError>(())
//! ```

pub mod error;
pub mod per;

pub use error::{AperError, AperResult};
pub use per::{encode, encode_with_params, BitWriter, PerEncoder};
