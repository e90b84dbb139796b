use super::{coerce_override, type_mismatch, FieldHandler};
use crate::bitfield::{decode_status, encode_status, random_status};
use crate::codec::Bindings;
use crate::encoding::reader::Frame;
use crate::encoding::writer::FrameWriter;
use crate::random::{RandomContext, RandomProvider};
use crate::schema::{FieldDescriptor, FieldRole};
use crate::value::FieldValue;
use crate::{CodecError, DecodeError};

#[derive(Debug, Clone, Copy, Default)]
pub struct StatusHandler;

impl FieldHandler for StatusHandler {
    fn handles(&self, role: &FieldRole) -> bool {
        matches!(role, FieldRole::BitfieldStatus { .. })
    }

    fn decode(
        &self,
        field: &FieldDescriptor,
        frame: &Frame<'_>,
        bindings: &Bindings,
    ) -> Result<FieldValue, CodecError> {
        let descriptor = bindings.status_type(field)?;
        let byte = frame
            .field_bytes(field)?
            .first()
            .copied()
            .ok_or(DecodeError::Malformed("empty status field"))?;
        Ok(FieldValue::Status(decode_status(descriptor, byte)))
    }

    fn encode(
        &self,
        field: &FieldDescriptor,
        value: &FieldValue,
        out: &mut FrameWriter<'_>,
        bindings: &Bindings,
    ) -> Result<(), CodecError> {
        let descriptor = bindings.status_type(field)?;
        let FieldValue::Status(flags) = value else {
            return Err(type_mismatch(field, value));
        };
        let byte = encode_status(descriptor, flags)?;
        out.write_field(field, &[byte])?;
        Ok(())
    }

    fn randomize(
        &self,
        field: &FieldDescriptor,
        provider: Option<&dyn RandomProvider>,
        ctx: &mut RandomContext<'_>,
    ) -> Result<FieldValue, CodecError> {
        let bindings = ctx.bindings();
        if let Some(provider) = provider {
            let sampled = provider.sample(ctx.rng());
            return coerce_override(self, field, sampled, bindings);
        }
        let descriptor = bindings.status_type(field)?;
        Ok(FieldValue::Status(random_status(descriptor, ctx.rng())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecBuilder;
    use crate::schema::BitfieldDescriptor;
    use crate::value::StatusFlags;
    use crate::SchemaError;

    fn bindings() -> Bindings {
        let mut builder = CodecBuilder::new();
        builder
            .register_status(
                BitfieldDescriptor::new("gas_alarm")
                    .flag(7, "o2_alarm")
                    .flag(6, "h2s_alarm")
                    .flag(3, "power"),
            )
            .unwrap();
        builder.build().bindings().clone()
    }

    #[test]
    fn decodes_bound_descriptor() {
        let field = FieldDescriptor::status("status", 1, "gas_alarm");
        let value = StatusHandler
            .decode(&field, &Frame::new(&[0x00, 0x11], &[]), &bindings())
            .unwrap();
        let flags = value.as_status().unwrap();
        assert_eq!(flags.get("o2_alarm"), Some(true));
        assert_eq!(flags.get("h2s_alarm"), Some(false));
        assert_eq!(flags.get("power"), Some(true));
    }

    #[test]
    fn encodes_set_flags() {
        let field = FieldDescriptor::status("status", 0, "gas_alarm");
        let flags = StatusFlags::new().with("h2s_alarm", true).with("power", true);
        let mut buf = [0u8; 1];
        StatusHandler
            .encode(
                &field,
                &FieldValue::Status(flags),
                &mut FrameWriter::new(&mut buf),
                &bindings(),
            )
            .unwrap();
        assert_eq!(buf, [0x12]);
    }

    #[test]
    fn unbound_status_type_fails_decode() {
        let field = FieldDescriptor::status("status", 0, "missing");
        let err = StatusHandler
            .decode(&field, &Frame::new(&[0xFF], &[]), &bindings())
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::Schema(SchemaError::UnknownStatusType {
                field: "status".into(),
                status: "missing".into()
            })
        );
    }
}
