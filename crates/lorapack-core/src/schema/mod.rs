//! Declarative record layouts.
//!
//! A [`RecordSchema`] is an ordered table of [`FieldDescriptor`]s plus the total
//! payload size. Schemas are validated once, when they are registered with a
//! [`CodecBuilder`](crate::codec::CodecBuilder), and are immutable afterwards.

use std::collections::HashSet;

use crate::decimal::{Decimal, MAX_SCALE};
use crate::SchemaError;

pub mod bitfield;
pub mod enum_space;

pub use bitfield::{BitFlag, BitfieldDescriptor};
pub use enum_space::{EnumMember, EnumSpace};

/// Widest numeric field, in bytes. Values are carried as `u64` before scaling.
pub const MAX_NUMERIC_WIDTH: usize = 8;

/// What a field means, and therefore which handler decodes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldRole {
    /// Out-of-band identifier; never part of the payload.
    DeviceIdentifier,
    RawInteger,
    SignedInteger,
    Float32,
    /// Code looked up in the named [`EnumSpace`].
    Enum { space: String },
    /// One status byte decoded through the named [`BitfieldDescriptor`].
    BitfieldStatus { status: String },
    FirmwareVersion,
    /// Role served by a handler registered at startup.
    Custom(String),
}

/// Byte/value transform applied to numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConverterKind {
    /// Plain big-endian unsigned integer, no scaling.
    #[default]
    Raw,
    Unsigned,
    Signed,
    Ieee754,
    Divide,
    Multiply,
}

/// Inclusive bit range, MSB-first within the selected bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitRange {
    pub start: usize,
    pub end: usize,
}

impl BitRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(self) -> usize {
        self.end - self.start + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDescriptor {
    pub name: String,
    pub byte_start: usize,
    /// Inclusive.
    pub byte_end: usize,
    pub bit_range: Option<BitRange>,
    pub role: FieldRole,
    /// Fractional decimal digits.
    pub scale: u32,
    pub offset: Decimal,
    pub converter: ConverterKind,
}

impl FieldDescriptor {
    fn with_role(
        name: &str,
        byte_start: usize,
        byte_end: usize,
        role: FieldRole,
        converter: ConverterKind,
    ) -> Self {
        Self {
            name: name.to_string(),
            byte_start,
            byte_end,
            bit_range: None,
            role,
            scale: 0,
            offset: Decimal::ZERO,
            converter,
        }
    }

    pub fn device_id(name: &str) -> Self {
        Self::with_role(name, 0, 0, FieldRole::DeviceIdentifier, ConverterKind::Raw)
    }

    pub fn raw(name: &str, byte_start: usize, byte_end: usize) -> Self {
        Self::with_role(
            name,
            byte_start,
            byte_end,
            FieldRole::RawInteger,
            ConverterKind::Raw,
        )
    }

    pub fn unsigned(name: &str, byte_start: usize, byte_end: usize) -> Self {
        Self::with_role(
            name,
            byte_start,
            byte_end,
            FieldRole::RawInteger,
            ConverterKind::Unsigned,
        )
    }

    pub fn signed(name: &str, byte_start: usize, byte_end: usize) -> Self {
        Self::with_role(
            name,
            byte_start,
            byte_end,
            FieldRole::SignedInteger,
            ConverterKind::Signed,
        )
    }

    pub fn float32(name: &str, byte_start: usize, byte_end: usize) -> Self {
        Self::with_role(
            name,
            byte_start,
            byte_end,
            FieldRole::Float32,
            ConverterKind::Ieee754,
        )
    }

    /// Fixed-point field: raw integer divided by `10^scale`.
    pub fn divide(name: &str, byte_start: usize, byte_end: usize, scale: u32) -> Self {
        let mut field = Self::with_role(
            name,
            byte_start,
            byte_end,
            FieldRole::RawInteger,
            ConverterKind::Divide,
        );
        field.scale = scale;
        field
    }

    /// Raw integer multiplied by `10^scale`.
    pub fn multiply(name: &str, byte_start: usize, byte_end: usize, scale: u32) -> Self {
        let mut field = Self::with_role(
            name,
            byte_start,
            byte_end,
            FieldRole::RawInteger,
            ConverterKind::Multiply,
        );
        field.scale = scale;
        field
    }

    pub fn enumeration(name: &str, byte_start: usize, byte_end: usize, space: &str) -> Self {
        Self::with_role(
            name,
            byte_start,
            byte_end,
            FieldRole::Enum {
                space: space.to_string(),
            },
            ConverterKind::Raw,
        )
    }

    pub fn status(name: &str, byte: usize, status: &str) -> Self {
        Self::with_role(
            name,
            byte,
            byte,
            FieldRole::BitfieldStatus {
                status: status.to_string(),
            },
            ConverterKind::Raw,
        )
    }

    pub fn firmware(name: &str, byte_start: usize) -> Self {
        Self::with_role(
            name,
            byte_start,
            byte_start.saturating_add(1),
            FieldRole::FirmwareVersion,
            ConverterKind::Raw,
        )
    }

    pub fn custom(name: &str, byte_start: usize, byte_end: usize, role: &str) -> Self {
        Self::with_role(
            name,
            byte_start,
            byte_end,
            FieldRole::Custom(role.to_string()),
            ConverterKind::Raw,
        )
    }

    pub fn with_bit_range(mut self, start: usize, end: usize) -> Self {
        self.bit_range = Some(BitRange::new(start, end));
        self
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_offset(mut self, offset: Decimal) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_converter(mut self, converter: ConverterKind) -> Self {
        self.converter = converter;
        self
    }

    /// Number of payload bytes the field spans. Saturates on ranges `validate` rejects.
    pub const fn width(&self) -> usize {
        self.byte_end.saturating_sub(self.byte_start).saturating_add(1)
    }

    pub fn is_device_id(&self) -> bool {
        self.role == FieldRole::DeviceIdentifier
    }

    /// Checks the descriptor on its own, independent of the record it belongs to.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let invalid = |reason: &'static str| SchemaError::InvalidField {
            field: self.name.clone(),
            reason,
        };

        if self.name.is_empty() {
            return Err(invalid("field name must not be empty"));
        }
        if self.is_device_id() {
            return Ok(());
        }
        if self.byte_end < self.byte_start {
            return Err(SchemaError::InvertedByteRange {
                field: self.name.clone(),
                byte_start: self.byte_start,
                byte_end: self.byte_end,
            });
        }
        if self.byte_end == usize::MAX {
            return Err(invalid("byte range overflows the address space"));
        }
        if let Some(range) = self.bit_range {
            let available = self.width().saturating_mul(8);
            if range.start > range.end || range.end >= available {
                return Err(SchemaError::BitRangeOutOfSpan {
                    field: self.name.clone(),
                    start: range.start,
                    end: range.end,
                    available,
                });
            }
            if range.len() > 64 {
                return Err(invalid("bit range wider than 64 bits"));
            }
        }
        if self.scale > MAX_SCALE {
            return Err(invalid("scale exceeds 18 fractional digits"));
        }

        match &self.role {
            FieldRole::RawInteger | FieldRole::SignedInteger | FieldRole::Float32 => {
                self.validate_numeric()
            }
            FieldRole::Enum { space } => {
                if space.is_empty() {
                    return Err(invalid("enum field must name an enum space"));
                }
                if self.bit_range.is_none() && self.width() > MAX_NUMERIC_WIDTH {
                    return Err(invalid("enum field wider than 8 bytes needs a bit range"));
                }
                Ok(())
            }
            FieldRole::BitfieldStatus { status } => {
                if status.is_empty() {
                    return Err(invalid("status field must name a status type"));
                }
                if self.width() != 1 {
                    return Err(invalid("status field must span exactly one byte"));
                }
                if self.bit_range.is_some() {
                    return Err(invalid("status field cannot carry a bit range"));
                }
                Ok(())
            }
            FieldRole::FirmwareVersion => {
                if self.width() != 2 {
                    return Err(invalid("firmware version must span exactly two bytes"));
                }
                if self.bit_range.is_some() {
                    return Err(invalid("firmware version cannot carry a bit range"));
                }
                Ok(())
            }
            FieldRole::DeviceIdentifier | FieldRole::Custom(_) => Ok(()),
        }
    }

    fn validate_numeric(&self) -> Result<(), SchemaError> {
        let invalid = |reason: &'static str| SchemaError::InvalidField {
            field: self.name.clone(),
            reason,
        };

        if self.bit_range.is_some() {
            return Err(invalid("bit ranges are only supported on enum fields"));
        }
        if self.width() > MAX_NUMERIC_WIDTH {
            return Err(invalid("numeric field wider than 8 bytes"));
        }

        let compatible = match self.role {
            FieldRole::RawInteger => matches!(
                self.converter,
                ConverterKind::Raw
                    | ConverterKind::Unsigned
                    | ConverterKind::Divide
                    | ConverterKind::Multiply
            ),
            FieldRole::SignedInteger => self.converter == ConverterKind::Signed,
            FieldRole::Float32 => self.converter == ConverterKind::Ieee754,
            _ => false,
        };
        if !compatible {
            return Err(invalid("converter does not match the field role"));
        }

        if !self.offset.is_zero()
            && !matches!(self.converter, ConverterKind::Unsigned | ConverterKind::Signed)
        {
            return Err(invalid("offset requires the unsigned or signed converter"));
        }
        if self.scale != 0 && matches!(self.converter, ConverterKind::Raw | ConverterKind::Ieee754)
        {
            return Err(invalid("scale is not applicable to this converter"));
        }
        Ok(())
    }
}

/// Layout of one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordSchema {
    pub record_type: String,
    pub total_size: usize,
    pub fields: Vec<FieldDescriptor>,
}

impl RecordSchema {
    pub fn new(record_type: &str, total_size: usize) -> Self {
        Self {
            record_type: record_type.to_string(),
            total_size,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn device_id_field(&self) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.is_device_id())
    }

    /// Fields that occupy payload bytes, in declaration order.
    pub fn payload_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.is_device_id())
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.record_type.is_empty() {
            return Err(SchemaError::InvalidRecord {
                record_type: self.record_type.clone(),
                reason: "record type must not be empty",
            });
        }
        if self.total_size == 0 {
            return Err(SchemaError::InvalidRecord {
                record_type: self.record_type.clone(),
                reason: "total size must be positive",
            });
        }

        let mut names = HashSet::new();
        for field in &self.fields {
            field.validate()?;
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::InvalidField {
                    field: field.name.clone(),
                    reason: "duplicate field name",
                });
            }
        }

        let device_ids = self.fields.iter().filter(|f| f.is_device_id()).count();
        if device_ids != 1 {
            return Err(SchemaError::DeviceIdentifierCount {
                record_type: self.record_type.clone(),
                found: device_ids,
            });
        }

        for field in self.payload_fields() {
            if field.byte_end >= self.total_size {
                return Err(SchemaError::FieldOutsideRecord {
                    field: field.name.clone(),
                    byte_end: field.byte_end,
                    total_size: self.total_size,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> RecordSchema {
        RecordSchema::new("probe", 4)
            .field(FieldDescriptor::device_id("dev_eui"))
            .field(FieldDescriptor::raw("kind", 0, 0))
            .field(FieldDescriptor::divide("temperature", 1, 2, 1))
            .field(FieldDescriptor::enumeration("mode", 3, 3, "mode").with_bit_range(0, 3))
    }

    #[test]
    fn accepts_well_formed_schema() {
        schema().validate().unwrap();
    }

    #[test]
    fn rejects_inverted_byte_range() {
        let field = FieldDescriptor::raw("bad", 3, 1);
        assert_eq!(
            field.validate().unwrap_err(),
            SchemaError::InvertedByteRange {
                field: "bad".into(),
                byte_start: 3,
                byte_end: 1
            }
        );
    }

    #[test]
    fn rejects_byte_range_at_address_limit() {
        let field = FieldDescriptor::raw("huge", 0, usize::MAX);
        assert!(matches!(
            field.validate().unwrap_err(),
            SchemaError::InvalidField { ref field, .. } if field == "huge"
        ));

        let schema = RecordSchema::new("wide", 4)
            .field(FieldDescriptor::device_id("dev_eui"))
            .field(FieldDescriptor::raw("huge", 0, usize::MAX));
        assert!(matches!(
            schema.validate().unwrap_err(),
            SchemaError::InvalidField { .. }
        ));

        let firmware = FieldDescriptor::firmware("fw", usize::MAX);
        assert_eq!(firmware.width(), 1);
        assert!(firmware.validate().is_err());
    }

    #[test]
    fn rejects_bit_range_outside_span() {
        let field = FieldDescriptor::enumeration("mode", 3, 3, "mode").with_bit_range(4, 8);
        assert!(matches!(
            field.validate().unwrap_err(),
            SchemaError::BitRangeOutOfSpan { available: 8, .. }
        ));

        let field = FieldDescriptor::enumeration("mode", 3, 3, "mode").with_bit_range(5, 2);
        assert!(matches!(
            field.validate().unwrap_err(),
            SchemaError::BitRangeOutOfSpan { .. }
        ));
    }

    #[test]
    fn rejects_field_past_total_size() {
        let schema = schema().field(FieldDescriptor::raw("tail", 4, 5));
        assert!(matches!(
            schema.validate().unwrap_err(),
            SchemaError::FieldOutsideRecord { byte_end: 5, .. }
        ));
    }

    #[test]
    fn requires_exactly_one_device_identifier() {
        let missing = RecordSchema::new("probe", 1).field(FieldDescriptor::raw("kind", 0, 0));
        assert!(matches!(
            missing.validate().unwrap_err(),
            SchemaError::DeviceIdentifierCount { found: 0, .. }
        ));

        let doubled = schema().field(FieldDescriptor::device_id("other"));
        assert!(matches!(
            doubled.validate().unwrap_err(),
            SchemaError::DeviceIdentifierCount { found: 2, .. }
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let schema = schema().field(FieldDescriptor::raw("kind", 0, 0));
        assert!(matches!(
            schema.validate().unwrap_err(),
            SchemaError::InvalidField { reason: "duplicate field name", .. }
        ));
    }

    #[test]
    fn rejects_mismatched_converter() {
        let field = FieldDescriptor::float32("level", 0, 3).with_converter(ConverterKind::Divide);
        assert!(field.validate().is_err());

        let field = FieldDescriptor::divide("t", 0, 1, 1).with_offset(Decimal::from_int(3));
        assert!(field.validate().is_err());

        let field = FieldDescriptor::unsigned("t", 0, 1).with_offset(Decimal::from_int(-40));
        field.validate().unwrap();
    }

    #[test]
    fn float_width_is_left_to_the_converter() {
        FieldDescriptor::float32("level", 0, 1).validate().unwrap();
    }

    #[test]
    fn status_and_firmware_widths_are_fixed() {
        let mut status = FieldDescriptor::status("status", 1, "sensor");
        status.byte_end = 2;
        assert!(status.validate().is_err());

        let mut firmware = FieldDescriptor::firmware("fw", 0);
        firmware.byte_end = 2;
        assert!(firmware.validate().is_err());
    }
}
