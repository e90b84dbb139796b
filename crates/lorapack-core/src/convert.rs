//! Byte/value transforms for numeric fields.
//!
//! Every strategy is a pure pair of functions over the field's byte slice. The
//! encode half is the inverse of the decode half up to the declared scale:
//! values are rounded half away from zero to `scale` fractional digits, then
//! range-checked against the field width. Nothing is ever truncated.

use crate::decimal::Decimal;
use crate::encoding::bits::{be_bytes, be_unsigned, max_for_bits};
use crate::schema::ConverterKind;
use crate::value::FieldValue;
use crate::{DecodeError, EncodeError};

pub use crate::encoding::bits::{extract_bits, insert_bits};

pub trait Converter: Send + Sync {
    fn decode(&self, bytes: &[u8], scale: u32, offset: Decimal) -> Result<FieldValue, DecodeError>;

    fn encode(
        &self,
        value: &FieldValue,
        width: usize,
        scale: u32,
        offset: Decimal,
    ) -> Result<Vec<u8>, EncodeError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RawConverter;
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsignedConverter;
#[derive(Debug, Clone, Copy, Default)]
pub struct SignedConverter;
#[derive(Debug, Clone, Copy, Default)]
pub struct Ieee754Converter;
#[derive(Debug, Clone, Copy, Default)]
pub struct DivideConverter;
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiplyConverter;

impl ConverterKind {
    pub fn strategy(self) -> &'static dyn Converter {
        match self {
            Self::Raw => &RawConverter,
            Self::Unsigned => &UnsignedConverter,
            Self::Signed => &SignedConverter,
            Self::Ieee754 => &Ieee754Converter,
            Self::Divide => &DivideConverter,
            Self::Multiply => &MultiplyConverter,
        }
    }
}

const SCALE_OVERFLOW: DecodeError = DecodeError::Malformed("scaled value overflows");

fn mismatch(value: &FieldValue) -> EncodeError {
    EncodeError::TypeMismatch {
        field: String::new(),
        found: value.kind(),
    }
}

fn overflow(value: impl ToString, width: usize) -> EncodeError {
    EncodeError::Overflow {
        value: value.to_string(),
        width,
    }
}

/// Numeric view of an encode input. Floats go through their shortest decimal text.
fn numeric(value: &FieldValue) -> Result<Decimal, EncodeError> {
    match value {
        FieldValue::Float(v) if v.is_finite() => v.to_string().parse().map_err(|_| mismatch(value)),
        other => other.as_decimal().ok_or_else(|| mismatch(other)),
    }
}

/// `(value - offset)` as an integer count of `10^-scale` units.
fn scaled_units(value: Decimal, scale: u32, offset: Decimal, width: usize) -> Result<i128, EncodeError> {
    value
        .checked_sub(offset)
        .and_then(|v| v.round_to(scale))
        .map(Decimal::mantissa)
        .ok_or_else(|| overflow(value, width))
}

fn unsigned_bytes(units: i128, width: usize, shown: Decimal) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || width > 8 {
        return Err(EncodeError::InvalidWidth {
            expected: 8,
            actual: width,
        });
    }
    let raw = u64::try_from(units).map_err(|_| overflow(shown, width))?;
    if raw > max_for_bits(width * 8) {
        return Err(overflow(shown, width));
    }
    be_bytes(raw, width)
}

fn scaled(raw: i128, scale: u32, offset: Decimal) -> Result<FieldValue, DecodeError> {
    Decimal::new(raw, 0)
        .shift(-(scale as i32))
        .and_then(|v| v.checked_add(offset))
        .map(FieldValue::Decimal)
        .ok_or(SCALE_OVERFLOW)
}

impl Converter for RawConverter {
    fn decode(&self, bytes: &[u8], _scale: u32, _offset: Decimal) -> Result<FieldValue, DecodeError> {
        be_unsigned(bytes).map(FieldValue::Integer)
    }

    fn encode(
        &self,
        value: &FieldValue,
        width: usize,
        _scale: u32,
        _offset: Decimal,
    ) -> Result<Vec<u8>, EncodeError> {
        let number = numeric(value)?;
        let units = number.to_integer().ok_or(EncodeError::TypeMismatch {
            field: String::new(),
            found: "fractional decimal",
        })?;
        unsigned_bytes(units, width, number)
    }
}

impl Converter for UnsignedConverter {
    fn decode(&self, bytes: &[u8], scale: u32, offset: Decimal) -> Result<FieldValue, DecodeError> {
        let raw = be_unsigned(bytes)?;
        scaled(raw as i128, scale, offset)
    }

    fn encode(
        &self,
        value: &FieldValue,
        width: usize,
        scale: u32,
        offset: Decimal,
    ) -> Result<Vec<u8>, EncodeError> {
        let number = numeric(value)?;
        let units = scaled_units(number, scale, offset, width)?;
        unsigned_bytes(units, width, number)
    }
}

impl Converter for SignedConverter {
    fn decode(&self, bytes: &[u8], scale: u32, offset: Decimal) -> Result<FieldValue, DecodeError> {
        let raw = be_unsigned(bytes)? as i128;
        let bits = bytes.len() as u32 * 8;
        let signed = if raw > (1i128 << (bits - 1)) - 1 {
            raw - (1i128 << bits)
        } else {
            raw
        };
        scaled(signed, scale, offset)
    }

    fn encode(
        &self,
        value: &FieldValue,
        width: usize,
        scale: u32,
        offset: Decimal,
    ) -> Result<Vec<u8>, EncodeError> {
        if width == 0 || width > 8 {
            return Err(EncodeError::InvalidWidth {
                expected: 8,
                actual: width,
            });
        }
        let number = numeric(value)?;
        let units = scaled_units(number, scale, offset, width)?;
        let bits = width as u32 * 8;
        let min = -(1i128 << (bits - 1));
        let max = (1i128 << (bits - 1)) - 1;
        if units < min || units > max {
            return Err(overflow(number, width));
        }
        let raw = (units & max_for_bits(width * 8) as i128) as u64;
        be_bytes(raw, width)
    }
}

impl Converter for Ieee754Converter {
    fn decode(&self, bytes: &[u8], _scale: u32, _offset: Decimal) -> Result<FieldValue, DecodeError> {
        let raw: [u8; 4] = bytes.try_into().map_err(|_| DecodeError::InvalidWidth {
            expected: 4,
            actual: bytes.len(),
        })?;
        Ok(FieldValue::Float(f32::from_be_bytes(raw)))
    }

    fn encode(
        &self,
        value: &FieldValue,
        width: usize,
        _scale: u32,
        _offset: Decimal,
    ) -> Result<Vec<u8>, EncodeError> {
        if width != 4 {
            return Err(EncodeError::InvalidWidth {
                expected: 4,
                actual: width,
            });
        }
        let float = match value {
            FieldValue::Float(v) => *v,
            other => other.as_decimal().ok_or_else(|| mismatch(other))?.to_f32(),
        };
        Ok(float.to_be_bytes().to_vec())
    }
}

impl Converter for DivideConverter {
    fn decode(&self, bytes: &[u8], scale: u32, _offset: Decimal) -> Result<FieldValue, DecodeError> {
        let raw = be_unsigned(bytes)?;
        Ok(FieldValue::Decimal(Decimal::new(raw as i128, scale)))
    }

    fn encode(
        &self,
        value: &FieldValue,
        width: usize,
        scale: u32,
        _offset: Decimal,
    ) -> Result<Vec<u8>, EncodeError> {
        let number = numeric(value)?;
        let units = scaled_units(number, scale, Decimal::ZERO, width)?;
        unsigned_bytes(units, width, number)
    }
}

impl Converter for MultiplyConverter {
    fn decode(&self, bytes: &[u8], scale: u32, _offset: Decimal) -> Result<FieldValue, DecodeError> {
        let raw = be_unsigned(bytes)?;
        Decimal::new(raw as i128, 0)
            .shift(scale as i32)
            .map(FieldValue::Decimal)
            .ok_or(SCALE_OVERFLOW)
    }

    fn encode(
        &self,
        value: &FieldValue,
        width: usize,
        scale: u32,
        _offset: Decimal,
    ) -> Result<Vec<u8>, EncodeError> {
        let number = numeric(value)?;
        let units = number
            .shift(-(scale as i32))
            .and_then(|v| v.round_to(0))
            .map(Decimal::mantissa)
            .ok_or_else(|| overflow(number, width))?;
        unsigned_bytes(units, width, number)
    }
}
