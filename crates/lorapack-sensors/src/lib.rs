//! Record schemas for the LoRa sensors we receive uplinks from.
//!
//! Each sensor module exposes a `RECORD_TYPE` and a `schema()`. The enum
//! spaces and status types they reference live in [`enums`] and [`status`].
//! [`default_codec`] registers all of them.

pub mod enums;
pub mod gas;
pub mod safe_gas;
pub mod safety_signal;
pub mod status;
pub mod weather;

use lorapack_core::{Codec, CodecBuilder, RecordSchema, SchemaError};

/// Every sensor schema, in registration order.
pub fn schemas() -> Vec<RecordSchema> {
    vec![
        weather::schema(),
        safety_signal::schema(),
        safe_gas::schema(),
        gas::schema(),
    ]
}

/// Registers every sensor schema with its enum spaces and status types.
pub fn register_all(builder: &mut CodecBuilder) -> Result<(), SchemaError> {
    for space in enums::all() {
        builder.register_enum(space)?;
    }
    for status in status::all() {
        builder.register_status(status)?;
    }
    for schema in schemas() {
        builder.register_schema(schema)?;
    }
    Ok(())
}

/// A codec with every sensor registered and the default handlers.
pub fn default_codec() -> Result<Codec, SchemaError> {
    let mut builder = CodecBuilder::new();
    register_all(&mut builder)?;
    log::debug!("registered {} sensor schemas", schemas().len());
    Ok(builder.build())
}
