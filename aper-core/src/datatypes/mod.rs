//! Data types carried through the PER-ALIGNED codec

pub mod bit_string;
pub mod value;

pub use bit_string::BitString;
pub use value::{AsnValue, Choice, Field};
