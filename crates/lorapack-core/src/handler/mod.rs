//! Role-based dispatch from field descriptors to decode/encode/randomize logic.

use crate::codec::Bindings;
use crate::encoding::reader::Frame;
use crate::encoding::writer::FrameWriter;
use crate::random::{RandomContext, RandomProvider};
use crate::schema::{FieldDescriptor, FieldRole};
use crate::value::FieldValue;
use crate::{CodecError, EncodeError, SchemaError, UnsupportedTypeError};

mod device_id;
mod enumerated;
mod firmware;
mod numeric;
mod status;

pub use device_id::{normalize_device_id, DeviceIdHandler};
pub use enumerated::EnumHandler;
pub use firmware::FirmwareHandler;
pub use numeric::NumericHandler;
pub use status::StatusHandler;

/// Decode, encode and random generation for every field with a matching role.
///
/// Implementations must be stateless with respect to individual frames; one
/// handler instance serves every thread that holds the codec.
pub trait FieldHandler: Send + Sync {
    fn handles(&self, role: &FieldRole) -> bool;

    fn decode(
        &self,
        field: &FieldDescriptor,
        frame: &Frame<'_>,
        bindings: &Bindings,
    ) -> Result<FieldValue, CodecError>;

    /// Writes `value` into the field's range of `out`.
    fn encode(
        &self,
        field: &FieldDescriptor,
        value: &FieldValue,
        out: &mut FrameWriter<'_>,
        bindings: &Bindings,
    ) -> Result<(), CodecError>;

    /// A valid value for `field`: sampled from `provider` when present, otherwise
    /// drawn from the field's whole domain.
    fn randomize(
        &self,
        field: &FieldDescriptor,
        provider: Option<&dyn RandomProvider>,
        ctx: &mut RandomContext<'_>,
    ) -> Result<FieldValue, CodecError>;
}

/// Ordered handler list: built-in roles first, then custom handlers in
/// registration order. The first handler that accepts a role wins.
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn FieldHandler>>,
}

impl HandlerRegistry {
    pub fn with_defaults() -> Self {
        Self {
            handlers: vec![
                Box::new(DeviceIdHandler),
                Box::new(NumericHandler),
                Box::new(EnumHandler),
                Box::new(StatusHandler),
                Box::new(FirmwareHandler),
            ],
        }
    }

    pub fn register(&mut self, handler: Box<dyn FieldHandler>) {
        self.handlers.push(handler);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn resolve(&self, field: &FieldDescriptor) -> Result<&dyn FieldHandler, UnsupportedTypeError> {
        self.handlers
            .iter()
            .find(|h| h.handles(&field.role))
            .map(|h| &**h)
            .ok_or_else(|| UnsupportedTypeError {
                field: field.name.clone(),
                role: field.role.clone(),
            })
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Normalizes an override value by encoding it into a scratch frame and
/// decoding it back, so it obeys the field's width, scale and domain.
pub fn coerce_override(
    handler: &dyn FieldHandler,
    field: &FieldDescriptor,
    value: FieldValue,
    bindings: &Bindings,
) -> Result<FieldValue, CodecError> {
    let invalid = |err: CodecError| match err {
        CodecError::Schema(schema) => CodecError::Schema(schema),
        other => CodecError::Schema(SchemaError::InvalidOverride {
            field: field.name.clone(),
            reason: other.to_string(),
        }),
    };

    let mut scratch = vec![0u8; field.byte_end + 1];
    let mut writer = FrameWriter::new(&mut scratch);
    handler
        .encode(field, &value, &mut writer, bindings)
        .map_err(invalid)?;
    handler
        .decode(field, &Frame::new(&scratch, &[]), bindings)
        .map_err(invalid)
}

/// Fills in the field name on errors raised below the handler layer.
pub(crate) fn name_mismatch(field: &FieldDescriptor, err: EncodeError) -> EncodeError {
    match err {
        EncodeError::TypeMismatch { found, .. } => EncodeError::TypeMismatch {
            field: field.name.clone(),
            found,
        },
        other => other,
    }
}

pub(crate) fn type_mismatch(field: &FieldDescriptor, value: &FieldValue) -> CodecError {
    CodecError::Encode(EncodeError::TypeMismatch {
        field: field.name.clone(),
        found: value.kind(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_builtin_roles() {
        let registry = HandlerRegistry::with_defaults();
        for field in [
            FieldDescriptor::device_id("dev_eui"),
            FieldDescriptor::raw("a", 0, 0),
            FieldDescriptor::signed("b", 0, 1),
            FieldDescriptor::float32("c", 0, 3),
            FieldDescriptor::enumeration("d", 0, 0, "space"),
            FieldDescriptor::status("e", 0, "status"),
            FieldDescriptor::firmware("f", 0),
        ] {
            assert!(registry.resolve(&field).is_ok(), "{}", field.name);
        }
    }

    #[test]
    fn custom_role_without_handler_is_unsupported() {
        let registry = HandlerRegistry::default();
        let field = FieldDescriptor::custom("ppm", 0, 1, "ppm");
        let err = registry.resolve(&field).err().unwrap();
        assert_eq!(
            err,
            UnsupportedTypeError {
                field: "ppm".into(),
                role: FieldRole::Custom("ppm".into())
            }
        );
    }
}
