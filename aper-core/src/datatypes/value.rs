//! In-memory ASN.1 value tree accepted by the PER encoder

use crate::datatypes::bit_string::BitString;
use crate::params::FieldParameters;
use serde::{Deserialize, Serialize};

/// Polymorphic ASN.1 value.
///
/// The encoder walks one of these trees; constraints do not live here but in
/// the [`FieldParameters`] attached to each field or passed alongside a
/// top-level value. `ObjectIdentifier` and `Real` are representable but have
/// no PER encoding in this codec and are rejected when dispatched, as is
/// `Null` outside of an absent OPTIONAL field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AsnValue {
    /// Null datum
    Null,
    /// BOOLEAN
    Boolean(bool),
    /// INTEGER (signed)
    Integer(i64),
    /// ENUMERATED, as a non-negative index
    Enumerated(u64),
    /// BIT STRING
    BitString(BitString),
    /// OCTET STRING
    OctetString(Vec<u8>),
    /// PrintableString, encoded with OCTET STRING semantics
    PrintableString(String),
    /// SEQUENCE: ordered record of named fields
    Sequence(Vec<Field>),
    /// SEQUENCE OF: ordered homogeneous sequence
    SequenceOf(Vec<AsnValue>),
    /// CHOICE (or OPEN TYPE, selected by the field's parameters)
    Choice(Choice),
    /// OBJECT IDENTIFIER (not encodable by this codec)
    ObjectIdentifier(Vec<u64>),
    /// REAL (not encodable by this codec)
    Real(f64),
}

/// One field of a SEQUENCE, or one alternative of a CHOICE.
///
/// `value == None` is the rendition of a null reference: legal absence for
/// an OPTIONAL field, an error anywhere a value is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, as referenced by open-type siblings
    pub name: String,
    /// Constraints for this field's value
    pub params: FieldParameters,
    /// The value, or `None` when absent
    pub value: Option<AsnValue>,
}

/// A CHOICE value: a 1-based `present` index selecting one alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// 1-based index of the selected alternative
    pub present: usize,
    /// All alternatives, in declaration order
    pub alternatives: Vec<Field>,
}

impl AsnValue {
    /// ASN.1 name of this value's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AsnValue::Null => "NULL",
            AsnValue::Boolean(_) => "BOOLEAN",
            AsnValue::Integer(_) => "INTEGER",
            AsnValue::Enumerated(_) => "ENUMERATED",
            AsnValue::BitString(_) => "BIT STRING",
            AsnValue::OctetString(_) => "OCTET STRING",
            AsnValue::PrintableString(_) => "PrintableString",
            AsnValue::Sequence(_) => "SEQUENCE",
            AsnValue::SequenceOf(_) => "SEQUENCE OF",
            AsnValue::Choice(_) => "CHOICE",
            AsnValue::ObjectIdentifier(_) => "OBJECT IDENTIFIER",
            AsnValue::Real(_) => "REAL",
        }
    }

    /// Numeric value usable as an open-type reference, if this is an
    /// INTEGER or ENUMERATED.
    pub fn reference_value(&self) -> Option<i64> {
        match self {
            AsnValue::Integer(value) => Some(*value),
            AsnValue::Enumerated(value) => i64::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Constructs a null datum
    pub fn new_null() -> Self {
        AsnValue::Null
    }

    /// Constructs a BOOLEAN
    pub fn new_bool(value: bool) -> Self {
        AsnValue::Boolean(value)
    }

    /// Constructs an INTEGER
    pub fn new_integer(value: i64) -> Self {
        AsnValue::Integer(value)
    }

    /// Constructs an ENUMERATED from its index
    pub fn new_enumerated(index: u64) -> Self {
        AsnValue::Enumerated(index)
    }

    /// Constructs an OCTET STRING
    pub fn new_octet_string(bytes: Vec<u8>) -> Self {
        AsnValue::OctetString(bytes)
    }

    /// Constructs a PrintableString
    pub fn new_printable_string(text: impl Into<String>) -> Self {
        AsnValue::PrintableString(text.into())
    }

    /// Constructs a SEQUENCE from its fields
    pub fn new_sequence(fields: Vec<Field>) -> Self {
        AsnValue::Sequence(fields)
    }
}

impl Field {
    /// A present field
    pub fn new(name: impl Into<String>, params: FieldParameters, value: AsnValue) -> Self {
        Self {
            name: name.into(),
            params,
            value: Some(value),
        }
    }

    /// An absent field (null reference)
    pub fn absent(name: impl Into<String>, params: FieldParameters) -> Self {
        Self {
            name: name.into(),
            params,
            value: None,
        }
    }
}

impl Choice {
    /// A CHOICE with the given selected index and alternatives
    pub fn new(present: usize, alternatives: Vec<Field>) -> Self {
        Self {
            present,
            alternatives,
        }
    }

    /// The selected alternative, if `present` is a valid 1-based index.
    pub fn selected(&self) -> Option<&Field> {
        self.present
            .checked_sub(1)
            .and_then(|index| self.alternatives.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(AsnValue::new_bool(true).kind_name(), "BOOLEAN");
        assert_eq!(AsnValue::new_integer(0).kind_name(), "INTEGER");
        assert_eq!(AsnValue::ObjectIdentifier(vec![1, 2]).kind_name(), "OBJECT IDENTIFIER");
    }

    #[test]
    fn test_reference_value() {
        assert_eq!(AsnValue::new_integer(-7).reference_value(), Some(-7));
        assert_eq!(AsnValue::new_enumerated(3).reference_value(), Some(3));
        assert_eq!(AsnValue::new_bool(true).reference_value(), None);
    }

    #[test]
    fn test_choice_selected() {
        let choice = Choice::new(
            2,
            vec![
                Field::new("a", FieldParameters::default(), AsnValue::new_bool(false)),
                Field::new("b", FieldParameters::default(), AsnValue::new_bool(true)),
            ],
        );
        assert_eq!(choice.selected().map(|f| f.name.as_str()), Some("b"));
        assert!(Choice::new(0, vec![]).selected().is_none());
    }

    #[test]
    fn test_field_presence() {
        let field = Field::new("flag", FieldParameters::default(), AsnValue::new_bool(true));
        assert!(field.value.is_some());
        let field = Field::absent("flag", FieldParameters::default());
        assert!(field.value.is_none());
    }
}
