//! Schema registry and the decode/encode/random engines built on it.
//!
//! Registration happens once through [`CodecBuilder`]; [`CodecBuilder::build`]
//! freezes everything into a [`Codec`] that is `Send + Sync` and never mutated
//! again, so a single instance can serve any number of threads.

use std::collections::{BTreeMap, HashMap};

use rand::RngCore;

use crate::encoding::reader::Frame;
use crate::encoding::writer::FrameWriter;
use crate::handler::{normalize_device_id, FieldHandler, HandlerRegistry};
use crate::random::{Overrides, RandomContext};
use crate::schema::{BitfieldDescriptor, EnumSpace, FieldDescriptor, FieldRole, RecordSchema};
use crate::value::{EncodedFrame, FieldValue, Record};
use crate::{CodecError, DecodeError, EncodeError, SchemaError};

/// Enum spaces and status types, looked up by the name a field binds.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    enums: HashMap<String, EnumSpace>,
    statuses: HashMap<String, BitfieldDescriptor>,
}

impl Bindings {
    pub fn enum_named(&self, name: &str) -> Option<&EnumSpace> {
        self.enums.get(name)
    }

    pub fn status_named(&self, name: &str) -> Option<&BitfieldDescriptor> {
        self.statuses.get(name)
    }

    /// The enum space `field` is bound to.
    pub fn enum_space(&self, field: &FieldDescriptor) -> Result<&EnumSpace, SchemaError> {
        let FieldRole::Enum { space } = &field.role else {
            return Err(SchemaError::InvalidField {
                field: field.name.clone(),
                reason: "field is not an enum",
            });
        };
        self.enums
            .get(space)
            .ok_or_else(|| SchemaError::UnknownEnumSpace {
                field: field.name.clone(),
                space: space.clone(),
            })
    }

    /// The status type `field` is bound to.
    pub fn status_type(&self, field: &FieldDescriptor) -> Result<&BitfieldDescriptor, SchemaError> {
        let FieldRole::BitfieldStatus { status } = &field.role else {
            return Err(SchemaError::InvalidField {
                field: field.name.clone(),
                reason: "field is not a status byte",
            });
        };
        self.statuses
            .get(status)
            .ok_or_else(|| SchemaError::UnknownStatusType {
                field: field.name.clone(),
                status: status.clone(),
            })
    }
}

#[derive(Debug, Default)]
pub struct CodecBuilder {
    schemas: BTreeMap<String, RecordSchema>,
    bindings: Bindings,
    handlers: HandlerRegistry,
}

impl CodecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_schema(&mut self, schema: RecordSchema) -> Result<&mut Self, SchemaError> {
        schema.validate()?;
        if self.schemas.contains_key(&schema.record_type) {
            return Err(SchemaError::DuplicateRecordType(schema.record_type));
        }
        log::debug!(
            "registered record type '{}' ({} bytes, {} fields)",
            schema.record_type,
            schema.total_size,
            schema.fields.len()
        );
        self.schemas.insert(schema.record_type.clone(), schema);
        Ok(self)
    }

    pub fn register_enum(&mut self, space: EnumSpace) -> Result<&mut Self, SchemaError> {
        space.validate()?;
        if self.bindings.enums.contains_key(&space.name) {
            return Err(SchemaError::DuplicateEnumSpace(space.name));
        }
        self.bindings.enums.insert(space.name.clone(), space);
        Ok(self)
    }

    pub fn register_status(&mut self, status: BitfieldDescriptor) -> Result<&mut Self, SchemaError> {
        status.validate()?;
        if self.bindings.statuses.contains_key(&status.name) {
            return Err(SchemaError::DuplicateStatusType(status.name));
        }
        self.bindings.statuses.insert(status.name.clone(), status);
        Ok(self)
    }

    /// Adds a handler after the built-in ones. Built-in roles keep their handlers.
    pub fn register_handler(&mut self, handler: Box<dyn FieldHandler>) -> &mut Self {
        self.handlers.register(handler);
        self
    }

    pub fn build(self) -> Codec {
        log::debug!(
            "codec ready: {} record types, {} enum spaces, {} status types, {} handlers",
            self.schemas.len(),
            self.bindings.enums.len(),
            self.bindings.statuses.len(),
            self.handlers.len()
        );
        Codec {
            schemas: self.schemas,
            bindings: self.bindings,
            handlers: self.handlers,
        }
    }
}

/// Frozen registry plus the engines that use it.
#[derive(Debug)]
pub struct Codec {
    schemas: BTreeMap<String, RecordSchema>,
    bindings: Bindings,
    handlers: HandlerRegistry,
}

impl Codec {
    pub fn builder() -> CodecBuilder {
        CodecBuilder::new()
    }

    pub fn schema(&self, record_type: &str) -> Result<&RecordSchema, SchemaError> {
        self.schemas
            .get(record_type)
            .ok_or_else(|| SchemaError::UnknownRecordType(record_type.to_string()))
    }

    /// Registered record types, sorted.
    pub fn record_types(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Decodes one payload. Any fatal field error aborts the whole record.
    pub fn decode(
        &self,
        record_type: &str,
        payload: &[u8],
        device_id: &[u8],
    ) -> Result<Record, CodecError> {
        let schema = self.schema(record_type)?;
        let frame = Frame::new(payload, device_id);
        if payload.len() != schema.total_size {
            log::debug!(
                "'{}' payload is {} bytes, schema declares {}",
                record_type,
                payload.len(),
                schema.total_size
            );
        }

        let mut record = Record::new(record_type);
        for field in &schema.fields {
            let handler = self.handlers.resolve(field)?;
            if !field.is_device_id() {
                frame.field_bytes(field)?;
            }
            let value = handler.decode(field, &frame, &self.bindings)?;
            log::trace!("{}.{} = {}", record_type, field.name, value);
            record.values.push((field.name.clone(), value));
        }
        log::debug!(
            "decoded '{}' from {} bytes for device {}",
            record_type,
            payload.len(),
            hex::encode(device_id)
        );
        Ok(record)
    }

    /// Hex-text convenience over [`Codec::decode`].
    pub fn decode_hex(
        &self,
        record_type: &str,
        payload_hex: &str,
        device_id_hex: &str,
    ) -> Result<Record, CodecError> {
        let payload = hex::decode(payload_hex.trim())
            .map_err(|_| DecodeError::Malformed("payload is not valid hex"))?;
        let device_id = hex::decode(device_id_hex.trim())
            .map_err(|_| DecodeError::Malformed("device id is not valid hex"))?;
        self.decode(record_type, &payload, &device_id)
    }

    /// Encodes `record` into a zero-filled payload of the schema's total size.
    pub fn encode(&self, record: &Record) -> Result<EncodedFrame, CodecError> {
        let schema = self.schema(&record.record_type)?;
        let mut payload = vec![0u8; schema.total_size];
        let mut device_id = String::new();

        let mut writer = FrameWriter::new(&mut payload);
        for field in &schema.fields {
            let value = record
                .get(&field.name)
                .ok_or_else(|| EncodeError::MissingField(field.name.clone()))?;
            if field.is_device_id() {
                device_id = match value {
                    FieldValue::DeviceId(id) | FieldValue::Text(id) => normalize_device_id(id)?,
                    other => {
                        return Err(EncodeError::TypeMismatch {
                            field: field.name.clone(),
                            found: other.kind(),
                        }
                        .into())
                    }
                };
                continue;
            }
            let handler = self.handlers.resolve(field)?;
            handler.encode(field, value, &mut writer, &self.bindings)?;
        }

        for (name, _) in record.iter() {
            if schema.get(name).is_none() {
                log::debug!("'{}' has no field '{}', ignoring it", record.record_type, name);
            }
        }
        log::debug!(
            "encoded '{}' into {} bytes for device {}",
            record.record_type,
            payload.len(),
            device_id
        );
        Ok(EncodedFrame { device_id, payload })
    }

    /// A schema-valid random record.
    ///
    /// Field overrides are checked against the schema, and enum space and status
    /// type overrides against the registered bindings, before anything is drawn.
    /// A field's own override wins over one keyed by its enum space or status type.
    pub fn random_record(
        &self,
        record_type: &str,
        device_id: Option<&str>,
        overrides: &Overrides,
        rng: &mut dyn RngCore,
    ) -> Result<Record, CodecError> {
        let schema = self.schema(record_type)?;
        if let Some(unknown) = overrides.field_names().find(|name| schema.get(name).is_none()) {
            return Err(SchemaError::UnknownOverrideField {
                record_type: record_type.to_string(),
                field: unknown.to_string(),
            }
            .into());
        }

        if let Some(space) = overrides
            .enum_spaces()
            .find(|space| self.bindings.enum_named(space).is_none())
        {
            return Err(SchemaError::UnknownOverrideType {
                kind: "enum space",
                name: space.to_string(),
            }
            .into());
        }
        if let Some(status) = overrides
            .status_types()
            .find(|status| self.bindings.status_named(status).is_none())
        {
            return Err(SchemaError::UnknownOverrideType {
                kind: "status type",
                name: status.to_string(),
            }
            .into());
        }

        let mut ctx = RandomContext::new(rng, &self.bindings, device_id);
        let mut record = Record::new(record_type);
        for field in &schema.fields {
            let handler = self.handlers.resolve(field)?;
            let value = handler.randomize(field, overrides.for_field(field), &mut ctx)?;
            record.values.push((field.name.clone(), value));
        }
        Ok(record)
    }

    pub fn random_record_with_thread_rng(
        &self,
        record_type: &str,
        device_id: Option<&str>,
        overrides: &Overrides,
    ) -> Result<Record, CodecError> {
        self.random_record(record_type, device_id, overrides, &mut rand::thread_rng())
    }
}
