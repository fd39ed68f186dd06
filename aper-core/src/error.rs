use thiserror::Error;

/// Main error type for PER-ALIGNED encoding operations
///
/// Every error aborts the encoding immediately; the caller never observes a
/// partially written octet stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AperError {
    /// A value does not fit in the requested bit width.
    #[error("value 0x{value:X} does not fit in {nbits} bits")]
    EncodeOverflow { value: u64, nbits: u32 },

    /// An INTEGER or ENUMERATED lies outside a non-extensible constraint.
    #[error("value out of range: {0}")]
    OutOfRange(String),

    /// A string or sequence size exceeds a non-extensible upper bound.
    #[error("size {size} is over the upper bound {upper_bound}")]
    SizeOverflow { size: u64, upper_bound: i64 },

    /// A string or sequence size is below the lower bound.
    #[error("size {size} is under the lower bound {lower_bound}")]
    SizeUnderflow { size: u64, lower_bound: i64 },

    /// A constraint is malformed (negative range, missing or inverted bounds).
    #[error("malformed constraint: {0}")]
    RangeNegative(String),

    /// A non-OPTIONAL SEQUENCE field carries no value.
    #[error("mandatory field \"{0}\" in SEQUENCE is not present")]
    MissingMandatory(String),

    /// A CHOICE `present` index is zero or exceeds the alternative count.
    #[error("CHOICE present index {present} is invalid for {alternatives} alternatives")]
    BadChoiceIndex { present: usize, alternatives: usize },

    /// An open-type field reference cannot be resolved or does not match.
    #[error("open type reference error: {0}")]
    BadOpenTypeReference(String),

    /// The value kind has no PER encoding in this codec.
    #[error("unsupported value kind: {0}")]
    Unsupported(String),

    /// A null value was dispatched for encoding.
    #[error("cannot encode a null value")]
    NilValue,

    /// A datatype was constructed from inconsistent raw parts.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for PER-ALIGNED encoding operations
pub type AperResult<T> = Result<T, AperError>;
