//! PER-ALIGNED (Packed Encoding Rules, aligned variant) encoder
//!
//! This module implements the encoding side of ITU-T X.691 aligned PER, as
//! used by 3GPP signalling protocols such as NGAP and S1AP.
//!
//! # PER-ALIGNED encoding overview
//!
//! Unlike the octet-oriented BER family, PER produces a *bit* stream and
//! uses the constraints of a type to drop everything the decoder can infer:
//!
//! - A BOOLEAN is one bit. An INTEGER constrained to `[0,7]` is three bits.
//!   An INTEGER whose constraint admits a single value is nothing at all.
//! - In the aligned variant, larger values return to an octet boundary
//!   before their content: a constrained whole number needing more than 8
//!   bits takes one or two whole octets, and strings above two octets are
//!   copied octet-aligned.
//! - Unconstrained lengths use a general length determinant:
//!
//! ```text
//! 0vvvvvvv            length 0..=127, one octet
//! 10vvvvvv vvvvvvvv   length 128..=16383, two octets
//! 11qqqqqq            fragment count q of 16384 units, value continues
//! ```
//!
//! The fragment form splits a long value into 64K/48K/32K/16K-unit pieces,
//! each length-prefixed, terminated by a short final fragment.
//!
//! - Extensible constraints spend one leading *extension bit*: `0` keeps
//!   the constrained root encoding, `1` switches to the unconstrained form.
//! - A SEQUENCE prefixes a presence bitmap, one bit per OPTIONAL field; a
//!   CHOICE encodes the selected index as a constrained whole number; an
//!   open type nests a complete encoding as length-prefixed octets.
//!
//! The encoder walks an [`aper_core::AsnValue`] tree and applies the
//! [`aper_core::FieldParameters`] attached to each field. Only encoding is
//! provided here; decoding is a separate concern with its own state.

pub mod writer;
pub mod encoder;

pub use writer::BitWriter;
pub use encoder::{encode, encode_with_params, PerEncoder};

/// Largest fragment carried by one length determinant, in units.
pub const MAX_FRAGMENT: u64 = 65536;

/// Fragment sizes from here up are expressed as a count of 16384-unit blocks.
pub const FRAGMENT_UNIT: u64 = 16384;
