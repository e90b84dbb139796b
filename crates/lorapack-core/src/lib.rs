//! Declarative codec for fixed-layout binary telemetry frames.
//!
//! `lorapack-core` turns compact sensor uplinks into typed records and back.
//! Each record type is described by a [`RecordSchema`]: a table of
//! [`FieldDescriptor`]s giving the byte range, optional bit range, role, and
//! decimal scaling of every field. A [`Codec`] built from those schemas
//! decodes payloads, encodes records into byte-exact payloads, and generates
//! random schema-valid records for round-trip testing.
//!
//! ```
//! use lorapack_core::{CodecBuilder, FieldDescriptor, RecordSchema};
//!
//! let mut builder = CodecBuilder::new();
//! builder
//!     .register_schema(
//!         RecordSchema::new("probe", 2)
//!             .field(FieldDescriptor::device_id("dev_eui"))
//!             .field(FieldDescriptor::divide("temperature", 0, 1, 1)),
//!     )
//!     .unwrap();
//! let codec = builder.build();
//!
//! let record = codec.decode("probe", &[0x00, 0xCD], &[0x01, 0x02]).unwrap();
//! assert_eq!(record.get("temperature").unwrap().to_string(), "20.5");
//! assert_eq!(codec.encode(&record).unwrap().payload, [0x00, 0xCD]);
//! ```
//!
//! # Feature flags
//!
//! - **`serde`**: derives `Serialize`/`Deserialize` on schema types, values and
//!   records. Decimals and firmware versions serialize as strings.

/// Status byte codec.
pub mod bitfield;
/// Registry, decode engine, encode engine and random record generation.
pub mod codec;
/// Byte/value converter strategies for numeric fields.
pub mod convert;
/// Scaled decimal arithmetic.
pub mod decimal;
/// Bit-level helpers plus the frame reader and writer.
pub mod encoding;
/// Error types for registration, decoding and encoding.
pub mod error;
/// Packed firmware version numbers.
pub mod firmware;
/// Role-based field handlers.
pub mod handler;
/// Value providers and per-field overrides for random records.
pub mod random;
/// Field descriptors, record schemas, enum spaces and status types.
pub mod schema;
/// Decoded values and records.
pub mod value;

pub use codec::{Bindings, Codec, CodecBuilder};
pub use decimal::Decimal;
pub use error::{CodecError, DecodeError, EncodeError, SchemaError, UnsupportedTypeError};
pub use firmware::FirmwareVersion;
pub use handler::FieldHandler;
pub use random::{FnProvider, ListProvider, Overrides, RandomProvider, RangeProvider};
pub use schema::{
    BitFlag, BitRange, BitfieldDescriptor, ConverterKind, EnumMember, EnumSpace, FieldDescriptor,
    FieldRole, RecordSchema,
};
pub use value::{EncodedFrame, FieldValue, Record, StatusFlags};
