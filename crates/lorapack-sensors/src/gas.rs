//! Portable four-gas detector, 18 bytes. Concentrations are IEEE 754 floats.

use lorapack_core::{FieldDescriptor, RecordSchema};

use crate::enums::GAS_MSG_TYPE;
use crate::status::GAS_ALARM_STATUS;

pub const RECORD_TYPE: &str = "gas";
pub const TOTAL_SIZE: usize = 18;

pub fn schema() -> RecordSchema {
    RecordSchema::new(RECORD_TYPE, TOTAL_SIZE)
        .field(FieldDescriptor::device_id("dev_eui"))
        .field(FieldDescriptor::enumeration("message_type", 0, 0, GAS_MSG_TYPE))
        .field(FieldDescriptor::status("sensor_state", 1, GAS_ALARM_STATUS))
        .field(FieldDescriptor::float32("o2_value", 2, 5))
        .field(FieldDescriptor::float32("h2_value", 6, 9))
        .field(FieldDescriptor::float32("lel_value", 10, 13))
        .field(FieldDescriptor::float32("co_value", 14, 17))
}
