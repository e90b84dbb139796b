use thiserror::Error;

use crate::schema::FieldRole;

/// Malformed descriptors, bad bindings, and lookups of things that were never registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field '{field}': byte_end {byte_end} is before byte_start {byte_start}")]
    InvertedByteRange {
        field: String,
        byte_start: usize,
        byte_end: usize,
    },
    #[error("field '{field}': bit range {start}..={end} does not fit in {available} bits")]
    BitRangeOutOfSpan {
        field: String,
        start: usize,
        end: usize,
        available: usize,
    },
    #[error("field '{field}': byte_end {byte_end} exceeds record size {total_size}")]
    FieldOutsideRecord {
        field: String,
        byte_end: usize,
        total_size: usize,
    },
    #[error("field '{field}': {reason}")]
    InvalidField { field: String, reason: &'static str },
    #[error("record '{record_type}' must have exactly one device identifier field, found {found}")]
    DeviceIdentifierCount { record_type: String, found: usize },
    #[error("record '{record_type}': {reason}")]
    InvalidRecord {
        record_type: String,
        reason: &'static str,
    },
    #[error("enum space '{space}': {reason}")]
    InvalidEnumSpace { space: String, reason: String },
    #[error("status type '{status}': {reason}")]
    InvalidStatusType { status: String, reason: String },
    #[error("record type '{0}' is already registered")]
    DuplicateRecordType(String),
    #[error("enum space '{0}' is already registered")]
    DuplicateEnumSpace(String),
    #[error("status type '{0}' is already registered")]
    DuplicateStatusType(String),
    #[error("record type '{0}' is not registered")]
    UnknownRecordType(String),
    #[error("enum space '{space}' bound to field '{field}' is not registered")]
    UnknownEnumSpace { field: String, space: String },
    #[error("status type '{status}' bound to field '{field}' is not registered")]
    UnknownStatusType { field: String, status: String },
    #[error("override names field '{field}' which record '{record_type}' does not declare")]
    UnknownOverrideField { record_type: String, field: String },
    #[error("override names {kind} '{name}' which is not registered")]
    UnknownOverrideType { kind: &'static str, name: String },
        #[error("override for field '{field}' is unusable: {reason}")]
    InvalidOverride { field: String, reason: String },
    #[error("invalid value provider: {0}")]
    InvalidProvider(&'static str),
}

/// Fatal decode failures. A failed decode never yields a partial record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("field '{field}' needs bytes up to index {byte_end}, payload has {len}")]
    OutOfBounds {
        field: String,
        byte_end: usize,
        len: usize,
    },
    #[error("expected {expected} bytes, got {actual}")]
    InvalidWidth { expected: usize, actual: usize },
    #[error("malformed value: {0}")]
    Malformed(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("value {value} does not fit in {width} byte(s)")]
    Overflow { value: String, width: usize },
    #[error("expected {expected} bytes, field spans {actual}")]
    InvalidWidth { expected: usize, actual: usize },
    #[error("record has no value for field '{0}'")]
    MissingField(String),
    #[error("field '{field}' cannot encode a {found} value")]
    TypeMismatch { field: String, found: &'static str },
    #[error("device identifier '{0}' is not valid hex")]
    InvalidDeviceId(String),
    #[error("firmware version '{0}' is not of the form V<major>.<minor>.<patch>")]
    InvalidFirmware(String),
    #[error("status flag '{0}' is not declared")]
    UnknownFlag(String),
    #[error("enum space '{space}' has no member named '{name}'")]
    UnknownMember { space: String, name: String },
    #[error("field range {byte_start}..={byte_end} is outside the {len}-byte buffer")]
    OutOfBounds {
        byte_start: usize,
        byte_end: usize,
        len: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no handler registered for field '{field}' with role {role:?}")]
pub struct UnsupportedTypeError {
    pub field: String,
    pub role: FieldRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
    #[error("unsupported type: {0}")]
    Unsupported(#[from] UnsupportedTypeError),
}
