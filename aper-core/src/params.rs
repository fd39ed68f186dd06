//! Per-field encoding constraints

use serde::{Deserialize, Serialize};

/// Constraints attached to a field or value being encoded.
///
/// PER encodes the same abstract type differently depending on its
/// constraints, so every value handed to the encoder travels with one of
/// these records. Size bounds count octets for OCTET STRING, bits for
/// BIT STRING and elements for SEQUENCE OF; value bounds apply to INTEGER
/// and ENUMERATED. An absent bound leaves that side unconstrained.
///
/// `reference_field_value` is not supplied by the caller: the SEQUENCE
/// walker fills it in when it resolves an open-type field against the
/// earlier sibling named by `reference_field_name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldParameters {
    /// Lower bound of the size constraint.
    pub size_lower_bound: Option<i64>,
    /// Upper bound of the size constraint.
    pub size_upper_bound: Option<i64>,
    /// The size constraint carries an extension marker.
    pub size_extensible: bool,
    /// Lower bound of the value constraint.
    pub value_lower_bound: Option<i64>,
    /// Upper bound of the value constraint.
    pub value_upper_bound: Option<i64>,
    /// The value constraint (or the SEQUENCE/CHOICE type) is extensible.
    pub value_extensible: bool,
    /// The field is OPTIONAL in its enclosing SEQUENCE.
    pub optional: bool,
    /// The field is encoded as an OPEN TYPE.
    pub open_type: bool,
    /// Name of the earlier sibling selecting the open-type alternative.
    pub reference_field_name: Option<String>,
    /// Resolved numeric value of that sibling, filled during the walk.
    pub reference_field_value: Option<i64>,
}

impl FieldParameters {
    /// Parameters with a value constraint `lb..=ub`
    pub fn value_range(lb: i64, ub: i64) -> Self {
        Self {
            value_lower_bound: Some(lb),
            value_upper_bound: Some(ub),
            ..Self::default()
        }
    }

    /// Parameters with a size constraint `lb..=ub`
    pub fn sized(lb: i64, ub: i64) -> Self {
        Self {
            size_lower_bound: Some(lb),
            size_upper_bound: Some(ub),
            ..Self::default()
        }
    }

    /// Parameters with a fixed size of exactly `n`
    pub fn fixed_size(n: i64) -> Self {
        Self::sized(n, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unconstrained() {
        let params = FieldParameters::default();
        assert_eq!(params.size_lower_bound, None);
        assert_eq!(params.size_upper_bound, None);
        assert_eq!(params.value_lower_bound, None);
        assert_eq!(params.value_upper_bound, None);
        assert!(!params.size_extensible);
        assert!(!params.value_extensible);
        assert!(!params.optional);
        assert!(!params.open_type);
    }

    #[test]
    fn test_constructors() {
        let params = FieldParameters::value_range(-5, 5);
        assert_eq!(params.value_lower_bound, Some(-5));
        assert_eq!(params.value_upper_bound, Some(5));

        let params = FieldParameters::fixed_size(4);
        assert_eq!(params.size_lower_bound, Some(4));
        assert_eq!(params.size_upper_bound, Some(4));
    }
}
