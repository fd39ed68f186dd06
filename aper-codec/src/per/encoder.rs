//! PER-ALIGNED encoder for ASN.1 value trees

use crate::error::{AperError, AperResult};
use crate::per::writer::BitWriter;
use crate::per::{FRAGMENT_UNIT, MAX_FRAGMENT};
use aper_core::datatypes::{AsnValue, Choice, Field};
use aper_core::params::FieldParameters;

/// Encode `value` with unconstrained top-level parameters.
pub fn encode(value: &AsnValue) -> AperResult<Vec<u8>> {
    encode_with_params(value, &FieldParameters::default())
}

/// Encode `value` under the given top-level field parameters.
///
/// # Returns
///
/// The complete PER-ALIGNED octet stream, with unused trailing bits zero.
/// PER requires at least one octet of output, so an encoding that produces
/// no bits (e.g. a fixed-value INTEGER as the sole value) yields a single
/// zero octet.
///
/// # Errors
///
/// Any [`AperError`] raised during the walk; nothing is returned on error.
pub fn encode_with_params(value: &AsnValue, params: &FieldParameters) -> AperResult<Vec<u8>> {
    let mut encoder = PerEncoder::new();
    encoder.encode_value(value, params)?;
    let bytes = encoder.into_bytes();
    if bytes.is_empty() {
        return Ok(vec![0x00]);
    }
    Ok(bytes)
}

/// PER-ALIGNED encoder
///
/// One recursive pass over an [`AsnValue`] tree, writing into a single
/// [`BitWriter`]. Constraints arrive as [`FieldParameters`] and select the
/// sub-encoding for each value: constrained, semi-constrained or
/// unconstrained whole numbers, fixed-size or length-prefixed strings, and
/// the structural forms for SEQUENCE, CHOICE, SEQUENCE OF and OPEN TYPE.
///
/// The encoder is synchronous and owns its writer; OPEN TYPE fields recurse
/// into a fresh nested encoder whose octets are re-embedded length-prefixed.
pub struct PerEncoder {
    writer: BitWriter,
}

impl PerEncoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self {
            writer: BitWriter::new(),
        }
    }

    /// Create a new encoder with initial buffer capacity in octets
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            writer: BitWriter::with_capacity(capacity),
        }
    }

    /// View of the octets produced so far
    pub fn as_bytes(&self) -> &[u8] {
        self.writer.as_bytes()
    }

    /// Finalize and yield the produced octets
    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_bytes()
    }

    /// Discard everything written so far
    pub fn clear(&mut self) {
        self.writer = BitWriter::new();
    }

    /// Encode one value under its field parameters.
    ///
    /// This is the dispatcher: it routes on the value's structural kind and
    /// hands the constraints to the matching sub-encoder.
    pub fn encode_value(&mut self, value: &AsnValue, params: &FieldParameters) -> AperResult<()> {
        match value {
            AsnValue::Null => Err(AperError::NilValue),
            AsnValue::Boolean(value) => self.append_boolean(*value),
            AsnValue::Integer(value) => self.append_integer(
                *value,
                params.value_extensible,
                params.value_lower_bound,
                params.value_upper_bound,
            ),
            AsnValue::Enumerated(value) => self.append_enumerated(
                *value,
                params.value_extensible,
                params.value_lower_bound,
                params.value_upper_bound,
            ),
            AsnValue::BitString(value) => self.append_bit_string(
                value.as_bytes(),
                value.num_bits() as u64,
                params.size_extensible,
                params.size_lower_bound,
                params.size_upper_bound,
            ),
            AsnValue::OctetString(value) => self.append_octet_string(
                value,
                params.size_extensible,
                params.size_lower_bound,
                params.size_upper_bound,
            ),
            AsnValue::PrintableString(value) => self.append_octet_string(
                value.as_bytes(),
                params.size_extensible,
                params.size_lower_bound,
                params.size_upper_bound,
            ),
            AsnValue::Sequence(fields) => self.encode_sequence(fields, params),
            AsnValue::SequenceOf(elements) => self.encode_sequence_of(elements, params),
            AsnValue::Choice(choice) => {
                // extension additions are not emitted, only the root marker
                if params.value_extensible {
                    self.writer.put_bits(0, 1)?;
                }
                if choice.present == 0 || choice.present > choice.alternatives.len() {
                    return Err(AperError::BadChoiceIndex {
                        present: choice.present,
                        alternatives: choice.alternatives.len(),
                    });
                }
                if params.open_type {
                    self.encode_open_type(choice, params)
                } else {
                    self.encode_choice(choice, params)
                }
            }
            AsnValue::ObjectIdentifier(_) | AsnValue::Real(_) => {
                Err(AperError::Unsupported(value.kind_name().to_string()))
            }
        }
    }

    /// Constrained whole number in `[0, range - 1]` (X.691 §10.5).
    ///
    /// Up to 255 values fit the minimum bit width without alignment; 256
    /// takes one aligned octet and anything up to 65536 two. Larger ranges
    /// are the caller's business (length-prefixed INTEGER form).
    fn append_constrained_value(&mut self, range: i64, value: u64) -> AperResult<()> {
        if range <= 255 {
            if range < 0 {
                return Err(AperError::RangeNegative(format!(
                    "constraint range {} is negative",
                    range
                )));
            }
            let mut nbits = 1u32;
            while (1i64 << nbits) < range {
                nbits += 1;
            }
            return self.writer.put_bits(value, nbits);
        }
        let octets: u32 = if range == 256 {
            1
        } else if range <= 65536 {
            2
        } else {
            return Err(AperError::Unsupported(format!(
                "constrained whole number range {} exceeds 65536",
                range
            )));
        };
        self.writer.align();
        self.writer.put_bits(value, octets * 8)
    }

    /// Length determinant (X.691 §11.9).
    ///
    /// `size_range > 0` selects the constrained form; otherwise the aligned
    /// general form: one octet up to 127, two octets up to 16383, and the
    /// fragment-count octet `11qqqqqq` from 16384 upward. The fragment form
    /// only ever appears inside a fragmentation loop, which keeps emitting
    /// determinants until a short final fragment closes the value.
    fn append_length(&mut self, size_range: i64, value: u64) -> AperResult<()> {
        if size_range > 0 && size_range <= 65536 {
            return self.append_constrained_value(size_range, value);
        }
        self.writer.align();
        if value <= 127 {
            self.writer.put_bits(value, 8)
        } else if value <= 16383 {
            self.writer.put_bits(value | 0x8000, 16)
        } else {
            log::trace!("length {} emitted as fragment count", value);
            self.writer.put_bits((value >> 14) | 0xC0, 8)
        }
    }

    /// Semi-constrained whole number with lower bound `lb` (X.691 §10.7):
    /// minimal unsigned octet count, length-prefixed.
    fn append_semi_constrained_value(&mut self, value: u64, lb: u64) -> AperResult<()> {
        if lb > value {
            return Err(AperError::OutOfRange(format!(
                "value {} is less than the lower bound {}",
                value, lb
            )));
        }
        let value = value - lb;
        let mut length = 1u64;
        let mut rest = value >> 8;
        while rest > 0 {
            length += 1;
            rest >>= 8;
        }
        self.append_length(-1, length)?;
        self.writer.put_bits(value, (length * 8) as u32)
    }

    /// Normally small non-negative whole number (X.691 §10.6): a one-bit
    /// discriminator favoring values below 64.
    fn append_normally_small_value(&mut self, value: u64) -> AperResult<()> {
        if value < 64 {
            self.writer.put_bits(0, 1)?;
            self.writer.put_bits(value, 6)
        } else {
            self.writer.put_bits(1, 1)?;
            self.append_semi_constrained_value(value, 0)
        }
    }

    /// BOOLEAN: a single bit, never aligned.
    fn append_boolean(&mut self, value: bool) -> AperResult<()> {
        self.writer.put_bits(u64::from(value), 1)
    }

    /// INTEGER (X.691 §12).
    ///
    /// Both bounds in range select the constrained form; a lower bound alone
    /// the semi-constrained length-prefixed form; no lower bound the
    /// unconstrained two's-complement form. An extensible constraint emits
    /// its extension bit first, and a value beyond the root falls back to
    /// the unconstrained form.
    fn append_integer(
        &mut self,
        value: i64,
        extensible: bool,
        lower: Option<i64>,
        upper: Option<i64>,
    ) -> AperResult<()> {
        let mut lb = 0i64;
        let mut value_range = 0i64;
        if let Some(lower) = lower {
            lb = lower;
            if value < lb {
                return Err(AperError::OutOfRange(format!(
                    "INTEGER {} is smaller than the lower bound {}",
                    value, lb
                )));
            }
            if let Some(ub) = upper {
                if value <= ub {
                    value_range = ub - lb + 1;
                } else if !extensible {
                    return Err(AperError::OutOfRange(format!(
                        "INTEGER {} is larger than the upper bound {}",
                        value, ub
                    )));
                }
                if extensible {
                    if value_range == 0 {
                        value_range = -1;
                        self.writer.put_bits(1, 1)?;
                    } else {
                        self.writer.put_bits(0, 1)?;
                    }
                }
            }
        } else {
            value_range = -1;
        }

        if value_range == 1 {
            // the constraint admits a single value, nothing to emit
            return Ok(());
        }

        let mut unsigned_value = value as u64;
        if value < 0 {
            unsigned_value = value.unsigned_abs() - 1;
        }
        if value_range <= 0 {
            unsigned_value >>= 7;
        } else if value_range <= 65536 {
            return self.append_constrained_value(value_range, value.wrapping_sub(lb) as u64);
        } else {
            unsigned_value >>= 8;
        }
        let mut raw_length: u32 = 1;
        while raw_length <= 127 {
            if unsigned_value == 0 {
                break;
            }
            unsigned_value >>= 8;
            raw_length += 1;
        }

        if value_range <= 0 {
            // semi-constrained or unconstrained: one aligned length octet
            self.writer.put_aligned_octets(&[raw_length as u8]);
        } else {
            // constrained with range > 65536: the length is encoded in the
            // minimum bit width covering the octet count of the range
            let mut range_octets = 1u32;
            let mut rest = (value_range - 1) as u64;
            loop {
                rest >>= 8;
                if rest <= 1 {
                    break;
                }
                range_octets += 1;
            }
            let mut nbits = 1u32;
            while (1u32 << nbits) < range_octets {
                nbits += 1;
            }
            self.writer.put_bits(u64::from(raw_length - 1), nbits)?;
        }
        log::trace!("INTEGER {} encoded in {} value octets", value, raw_length);

        let nbits = raw_length * 8;
        self.writer.align();
        if value_range < 0 {
            // two's complement, truncated to the minimal octet width
            let mask = if nbits >= 64 {
                u64::MAX
            } else {
                (1u64 << nbits) - 1
            };
            self.writer.put_bits((value as u64) & mask, nbits)
        } else {
            self.writer.put_bits(value.wrapping_sub(lb) as u64, nbits)
        }
    }

    /// ENUMERATED (X.691 §13): the root index as a constrained whole
    /// number, extension additions as a normally small number after the
    /// extension bit.
    fn append_enumerated(
        &mut self,
        value: u64,
        extensible: bool,
        lower: Option<i64>,
        upper: Option<i64>,
    ) -> AperResult<()> {
        let (lb, ub) = match (lower, upper) {
            (Some(lb), Some(ub)) => (lb, ub),
            _ => {
                return Err(AperError::RangeNegative(
                    "ENUMERATED requires both value bounds".to_string(),
                ))
            }
        };
        if lb < 0 || lb > ub {
            return Err(AperError::RangeNegative(format!(
                "ENUMERATED bounds {}..{} are malformed",
                lb, ub
            )));
        }
        if value <= ub as u64 {
            if value < lb as u64 {
                return Err(AperError::OutOfRange(format!(
                    "ENUMERATED {} is smaller than the lower bound {}",
                    value, lb
                )));
            }
            if extensible {
                self.writer.put_bits(0, 1)?;
            }
            let value_range = ub - lb + 1;
            if value_range > 1 {
                return self.append_constrained_value(value_range, value - lb as u64);
            }
            Ok(())
        } else {
            if !extensible {
                return Err(AperError::OutOfRange(format!(
                    "ENUMERATED {} is larger than the upper bound {}",
                    value, ub
                )));
            }
            self.writer.put_bits(1, 1)?;
            self.append_normally_small_value(value - ub as u64 - 1)
        }
    }

    /// BIT STRING (X.691 §15).
    ///
    /// A fixed size up to 16 bits stays packed at the current offset; a
    /// larger fixed size is octet-aligned. Everything else is
    /// length-prefixed and, past 16K bits, fragmented.
    fn append_bit_string(
        &mut self,
        data: &[u8],
        bit_length: u64,
        extensible: bool,
        lower: Option<i64>,
        upper: Option<i64>,
    ) -> AperResult<()> {
        let mut lb = 0i64;
        let mut ub = -1i64;
        let mut size_range = -1i64;
        if let Some(lower) = lower {
            lb = lower;
            if let Some(upper) = upper {
                ub = upper;
                if bit_length <= ub as u64 {
                    size_range = ub - lb + 1;
                } else if !extensible {
                    return Err(AperError::SizeOverflow {
                        size: bit_length,
                        upper_bound: ub,
                    });
                }
                if extensible {
                    if size_range == -1 {
                        self.writer.put_bits(1, 1)?;
                        lb = 0;
                    } else {
                        self.writer.put_bits(0, 1)?;
                    }
                }
            }
        }
        if ub > 65535 {
            size_range = -1;
        }

        if size_range == 1 {
            if bit_length != ub as u64 {
                return Err(AperError::SizeUnderflow {
                    size: bit_length,
                    lower_bound: lb,
                });
            }
            if (bit_length + 7) >> 3 > 2 {
                self.writer.align();
            }
            return self.writer.put_bit_string(data, bit_length);
        }

        if bit_length < lb as u64 {
            return Err(AperError::SizeUnderflow {
                size: bit_length,
                lower_bound: lb,
            });
        }
        let mut raw_length = bit_length - lb as u64;
        let mut byte_offset = 0usize;
        loop {
            let part = if raw_length > MAX_FRAGMENT {
                MAX_FRAGMENT
            } else if raw_length >= FRAGMENT_UNIT {
                raw_length & 0xC000
            } else {
                raw_length
            };
            self.append_length(size_range, part)?;
            let part_bits = part + lb as u64;
            if part_bits == 0 {
                return Ok(());
            }
            log::trace!("BIT STRING fragment of {} bits", part_bits);
            self.writer.align();
            let nbytes = ((part_bits + 7) >> 3) as usize;
            let end = byte_offset + nbytes;
            if end > data.len() {
                return Err(AperError::InvalidData(format!(
                    "bit string fragment at octets {}..{} exceeds {} data octets",
                    byte_offset,
                    end,
                    data.len()
                )));
            }
            self.writer.put_bit_string(&data[byte_offset..end], part_bits)?;
            raw_length -= part;
            if raw_length == 0 {
                return Ok(());
            }
            byte_offset = end;
        }
    }

    /// OCTET STRING (X.691 §16); PrintableString shares this encoding.
    ///
    /// The same shape as BIT STRING with sizes counted in octets, and a
    /// verbatim aligned copy once a fixed size exceeds two octets.
    fn append_octet_string(
        &mut self,
        data: &[u8],
        extensible: bool,
        lower: Option<i64>,
        upper: Option<i64>,
    ) -> AperResult<()> {
        let byte_length = data.len() as u64;
        let mut lb = 0i64;
        let mut ub = -1i64;
        let mut size_range = -1i64;
        if let Some(lower) = lower {
            lb = lower;
            if let Some(upper) = upper {
                ub = upper;
                if byte_length <= ub as u64 {
                    size_range = ub - lb + 1;
                } else if !extensible {
                    return Err(AperError::SizeOverflow {
                        size: byte_length,
                        upper_bound: ub,
                    });
                }
                if extensible {
                    if size_range == -1 {
                        self.writer.put_bits(1, 1)?;
                        lb = 0;
                    } else {
                        self.writer.put_bits(0, 1)?;
                    }
                }
            }
        }
        if ub > 65535 {
            size_range = -1;
        }

        if size_range == 1 {
            if byte_length != ub as u64 {
                return Err(AperError::SizeUnderflow {
                    size: byte_length,
                    lower_bound: lb,
                });
            }
            if byte_length > 2 {
                self.writer.put_aligned_octets(data);
            } else {
                self.writer.put_bit_string(data, byte_length * 8)?;
            }
            return Ok(());
        }

        if byte_length < lb as u64 {
            return Err(AperError::SizeUnderflow {
                size: byte_length,
                lower_bound: lb,
            });
        }
        let mut raw_length = byte_length - lb as u64;
        let mut byte_offset = 0usize;
        loop {
            let part = if raw_length > MAX_FRAGMENT {
                MAX_FRAGMENT
            } else if raw_length >= FRAGMENT_UNIT {
                raw_length & 0xC000
            } else {
                raw_length
            };
            self.append_length(size_range, part)?;
            let part_octets = part + lb as u64;
            if part_octets == 0 {
                return Ok(());
            }
            log::trace!("OCTET STRING fragment of {} octets", part_octets);
            let end = byte_offset + part_octets as usize;
            if end > data.len() {
                return Err(AperError::InvalidData(format!(
                    "octet string fragment at {}..{} exceeds {} data octets",
                    byte_offset,
                    end,
                    data.len()
                )));
            }
            self.writer.put_aligned_octets(&data[byte_offset..end]);
            raw_length -= part;
            if raw_length == 0 {
                return Ok(());
            }
            byte_offset = end;
        }
    }

    /// SEQUENCE (X.691 §18): extension bit, optional-presence bitmap, then
    /// the fields in declaration order. Open-type fields are resolved
    /// against their earlier reference sibling during the walk.
    fn encode_sequence(&mut self, fields: &[Field], params: &FieldParameters) -> AperResult<()> {
        // extension additions are not emitted, only the root marker
        if params.value_extensible {
            self.writer.put_bits(0, 1)?;
        }

        let optional_total = fields.iter().filter(|f| f.params.optional).count();
        if optional_total > 64 {
            return Err(AperError::Unsupported(format!(
                "{} OPTIONAL fields exceed the supported presence bitmap width",
                optional_total
            )));
        }
        let mut optional_count = 0u32;
        let mut optional_presents = 0u64;
        for field in fields {
            if field.params.optional {
                optional_count += 1;
                optional_presents <<= 1;
                if field.value.is_some() {
                    optional_presents |= 1;
                }
            } else if field.value.is_none() {
                return Err(AperError::MissingMandatory(field.name.clone()));
            }
        }
        if optional_count > 0 {
            log::trace!(
                "SEQUENCE presence bitmap 0b{:0width$b}",
                optional_presents,
                width = optional_count as usize
            );
            self.writer.put_bits(optional_presents, optional_count)?;
        }

        for (index, field) in fields.iter().enumerate() {
            let value = match field.value.as_ref() {
                Some(value) => value,
                None => continue,
            };
            if field.params.open_type {
                let resolved = resolve_reference(fields, index)?;
                let mut resolved_params = field.params.clone();
                resolved_params.reference_field_value = Some(resolved);
                self.encode_value(value, &resolved_params)?;
            } else {
                self.encode_value(value, &field.params)?;
            }
        }
        Ok(())
    }

    /// CHOICE (X.691 §22): the 0-based index as a constrained whole number
    /// over the root alternatives, then the selected alternative under its
    /// own parameters. `present` was validated by the dispatcher.
    fn encode_choice(&mut self, choice: &Choice, params: &FieldParameters) -> AperResult<()> {
        let ub = match params.value_upper_bound {
            Some(ub) if ub >= 0 => ub,
            Some(ub) => {
                return Err(AperError::RangeNegative(format!(
                    "CHOICE upper bound {} is negative",
                    ub
                )))
            }
            None => {
                return Err(AperError::RangeNegative(
                    "CHOICE upper bound is missing".to_string(),
                ))
            }
        };
        let raw_choice = (choice.present - 1) as i64;
        if params.value_extensible && raw_choice > ub {
            return Err(AperError::Unsupported(
                "CHOICE values outside the extension root are not encoded".to_string(),
            ));
        }
        log::trace!("CHOICE index {} of 0..={}", raw_choice, ub);
        self.append_constrained_value(ub + 1, raw_choice as u64)?;

        let alternative = &choice.alternatives[choice.present - 1];
        let value = alternative.value.as_ref().ok_or(AperError::NilValue)?;
        self.encode_value(value, &alternative.params)
    }

    /// OPEN TYPE (X.691 §23): the selected alternative is encoded into a
    /// fresh writer and its octets re-embedded with an unconstrained,
    /// possibly fragmented length. The outer writer is octet-aligned around
    /// the embedded stream.
    fn encode_open_type(&mut self, choice: &Choice, params: &FieldParameters) -> AperResult<()> {
        let expected = params.reference_field_value.ok_or_else(|| {
            AperError::BadOpenTypeReference("open type reference value is empty".to_string())
        })?;
        let alternative = &choice.alternatives[choice.present - 1];
        if alternative.params.reference_field_value != Some(expected) {
            return Err(AperError::BadOpenTypeReference(format!(
                "alternative \"{}\" does not carry reference value {}",
                alternative.name, expected
            )));
        }
        let value = alternative.value.as_ref().ok_or(AperError::NilValue)?;

        let mut nested = PerEncoder::new();
        nested.encode_value(value, &alternative.params)?;
        let octets = nested.into_bytes();
        log::trace!("open type \"{}\" nested into {} octets", alternative.name, octets.len());

        let mut raw_length = octets.len() as u64;
        let mut byte_offset = 0usize;
        loop {
            let part = if raw_length > MAX_FRAGMENT {
                MAX_FRAGMENT
            } else if raw_length >= FRAGMENT_UNIT {
                raw_length & 0xC000
            } else {
                raw_length
            };
            self.append_length(-1, part)?;
            if part == 0 {
                return Ok(());
            }
            let end = byte_offset + part as usize;
            self.writer.put_aligned_octets(&octets[byte_offset..end]);
            raw_length -= part;
            if raw_length == 0 {
                self.writer.align();
                return Ok(());
            }
            byte_offset = end;
        }
    }

    /// SEQUENCE OF (X.691 §19): length per the size constraint, then every
    /// element under the same parameters with the size constraint cleared.
    fn encode_sequence_of(
        &mut self,
        elements: &[AsnValue],
        params: &FieldParameters,
    ) -> AperResult<()> {
        let count = elements.len() as i64;
        let mut lb = 0i64;
        let mut ub = -1i64;
        let mut size_range = -1i64;
        if let Some(lower) = params.size_lower_bound {
            if lower < 65536 {
                lb = lower;
            }
        }
        match params.size_upper_bound {
            Some(upper) if upper < 65536 => {
                ub = upper;
                if params.size_extensible {
                    if count > ub {
                        self.writer.put_bits(1, 1)?;
                    } else {
                        self.writer.put_bits(0, 1)?;
                        size_range = ub - lb + 1;
                    }
                } else if count > ub {
                    return Err(AperError::SizeOverflow {
                        size: count as u64,
                        upper_bound: ub,
                    });
                } else {
                    size_range = ub - lb + 1;
                }
            }
            _ => {
                size_range = -1;
            }
        }

        if count < lb {
            return Err(AperError::SizeUnderflow {
                size: count as u64,
                lower_bound: lb,
            });
        }
        if size_range == 1 {
            if count != ub {
                return Err(AperError::SizeOverflow {
                    size: count as u64,
                    upper_bound: ub,
                });
            }
            // fixed size, no length emitted
        } else if size_range > 0 {
            self.append_constrained_value(size_range, (count - lb) as u64)?;
        } else {
            // single-octet short-form count; larger counts in this regime
            // are outside the encoder's scope
            self.writer.put_aligned_octets(&[(count & 0xFF) as u8]);
        }

        let mut element_params = params.clone();
        element_params.size_extensible = false;
        element_params.size_lower_bound = None;
        element_params.size_upper_bound = None;
        for element in elements {
            self.encode_value(element, &element_params)?;
        }
        Ok(())
    }
}

impl Default for PerEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the open-type reference of `fields[index]` against its earlier
/// sibling, yielding that sibling's numeric value.
fn resolve_reference(fields: &[Field], index: usize) -> AperResult<i64> {
    let field = &fields[index];
    let name = field.params.reference_field_name.as_deref().ok_or_else(|| {
        AperError::BadOpenTypeReference(format!(
            "open type field \"{}\" carries no reference field name",
            field.name
        ))
    })?;
    let sibling = fields[..index]
        .iter()
        .find(|candidate| candidate.name == name)
        .ok_or_else(|| {
            AperError::BadOpenTypeReference(format!(
                "no field named \"{}\" precedes open type field \"{}\"",
                name, field.name
            ))
        })?;
    let value = sibling.value.as_ref().ok_or_else(|| {
        AperError::BadOpenTypeReference(format!("reference field \"{}\" is not present", name))
    })?;
    value.reference_value().ok_or_else(|| {
        AperError::BadOpenTypeReference(format!(
            "reference field \"{}\" is not an INTEGER or ENUMERATED",
            name
        ))
    })
}
