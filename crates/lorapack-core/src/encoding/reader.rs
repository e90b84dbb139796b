use crate::schema::FieldDescriptor;
use crate::DecodeError;

/// One uplink: the payload bytes plus the out-of-band device identifier.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    payload: &'a [u8],
    device_id: &'a [u8],
}

impl<'a> Frame<'a> {
    pub const fn new(payload: &'a [u8], device_id: &'a [u8]) -> Self {
        Self { payload, device_id }
    }

    pub const fn payload(&self) -> &'a [u8] {
        self.payload
    }

    pub const fn device_id(&self) -> &'a [u8] {
        self.device_id
    }

    pub const fn len(&self) -> usize {
        self.payload.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// The bytes `field` spans.
    pub fn field_bytes(&self, field: &FieldDescriptor) -> Result<&'a [u8], DecodeError> {
        self.payload
            .get(field.byte_start..=field.byte_end)
            .ok_or_else(|| DecodeError::OutOfBounds {
                field: field.name.clone(),
                byte_end: field.byte_end,
                len: self.payload.len(),
            })
    }
}
