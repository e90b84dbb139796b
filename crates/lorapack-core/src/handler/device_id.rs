use super::{type_mismatch, FieldHandler};
use crate::codec::Bindings;
use crate::encoding::reader::Frame;
use crate::encoding::writer::FrameWriter;
use crate::random::{RandomContext, RandomProvider};
use crate::schema::{FieldDescriptor, FieldRole};
use crate::value::FieldValue;
use crate::{CodecError, EncodeError, SchemaError};

const RANDOM_ID_LEN: usize = 8;

/// Lowercase hex form of a device identifier, if `text` is valid hex.
pub fn normalize_device_id(text: &str) -> Result<String, EncodeError> {
    hex::decode(text)
        .map(hex::encode)
        .map_err(|_| EncodeError::InvalidDeviceId(text.to_string()))
}

/// The out-of-band identifier. Never reads or writes payload bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceIdHandler;

impl FieldHandler for DeviceIdHandler {
    fn handles(&self, role: &FieldRole) -> bool {
        *role == FieldRole::DeviceIdentifier
    }

    fn decode(
        &self,
        _field: &FieldDescriptor,
        frame: &Frame<'_>,
        _bindings: &Bindings,
    ) -> Result<FieldValue, CodecError> {
        Ok(FieldValue::DeviceId(hex::encode(frame.device_id())))
    }

    fn encode(
        &self,
        field: &FieldDescriptor,
        value: &FieldValue,
        _out: &mut FrameWriter<'_>,
        _bindings: &Bindings,
    ) -> Result<(), CodecError> {
        match value {
            FieldValue::DeviceId(id) | FieldValue::Text(id) => {
                normalize_device_id(id)?;
                Ok(())
            }
            other => Err(type_mismatch(field, other)),
        }
    }

    fn randomize(
        &self,
        field: &FieldDescriptor,
        provider: Option<&dyn RandomProvider>,
        ctx: &mut RandomContext<'_>,
    ) -> Result<FieldValue, CodecError> {
        if let Some(provider) = provider {
            return match provider.sample(ctx.rng()) {
                FieldValue::DeviceId(id) | FieldValue::Text(id) => normalize_device_id(&id)
                    .map(FieldValue::DeviceId)
                    .map_err(|err| {
                        SchemaError::InvalidOverride {
                            field: field.name.clone(),
                            reason: err.to_string(),
                        }
                        .into()
                    }),
                other => Err(SchemaError::InvalidOverride {
                    field: field.name.clone(),
                    reason: format!("expected a hex device id, got a {} value", other.kind()),
                }
                .into()),
            };
        }

        if let Some(id) = ctx.device_id() {
            return Ok(FieldValue::DeviceId(normalize_device_id(id)?));
        }
        let mut bytes = [0u8; RANDOM_ID_LEN];
        ctx.rng().fill_bytes(&mut bytes);
        Ok(FieldValue::DeviceId(hex::encode(bytes)))
    }
}
