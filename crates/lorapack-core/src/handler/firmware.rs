use rand::Rng;

use super::{coerce_override, type_mismatch, FieldHandler};
use crate::codec::Bindings;
use crate::encoding::reader::Frame;
use crate::encoding::writer::FrameWriter;
use crate::firmware::FirmwareVersion;
use crate::random::{RandomContext, RandomProvider};
use crate::schema::{FieldDescriptor, FieldRole};
use crate::value::FieldValue;
use crate::{CodecError, DecodeError};

#[derive(Debug, Clone, Copy, Default)]
pub struct FirmwareHandler;

impl FieldHandler for FirmwareHandler {
    fn handles(&self, role: &FieldRole) -> bool {
        *role == FieldRole::FirmwareVersion
    }

    fn decode(
        &self,
        field: &FieldDescriptor,
        frame: &Frame<'_>,
        _bindings: &Bindings,
    ) -> Result<FieldValue, CodecError> {
        let bytes = frame.field_bytes(field)?;
        let raw: [u8; 2] = bytes.try_into().map_err(|_| DecodeError::InvalidWidth {
            expected: 2,
            actual: bytes.len(),
        })?;
        Ok(FieldValue::Firmware(FirmwareVersion::from_packed(
            u16::from_be_bytes(raw),
        )))
    }

    fn encode(
        &self,
        field: &FieldDescriptor,
        value: &FieldValue,
        out: &mut FrameWriter<'_>,
        _bindings: &Bindings,
    ) -> Result<(), CodecError> {
        let version = match value {
            FieldValue::Firmware(version) => *version,
            FieldValue::Text(text) => text.parse()?,
            other => return Err(type_mismatch(field, other)),
        };
        out.write_field(field, &version.to_packed()?.to_be_bytes())?;
        Ok(())
    }

    fn randomize(
        &self,
        field: &FieldDescriptor,
        provider: Option<&dyn RandomProvider>,
        ctx: &mut RandomContext<'_>,
    ) -> Result<FieldValue, CodecError> {
        if let Some(provider) = provider {
            let sampled = provider.sample(ctx.rng());
            return coerce_override(self, field, sampled, ctx.bindings());
        }
        let rng = ctx.rng();
        Ok(FieldValue::Firmware(FirmwareVersion::new(
            rng.gen_range(0..=15),
            rng.gen_range(0..=15),
            rng.gen(),
        )))
    }
}
