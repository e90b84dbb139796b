//! Weather station uplink, 25 bytes.

use lorapack_core::{FieldDescriptor, RecordSchema};

use crate::status::SENSOR_STATUS;

pub const RECORD_TYPE: &str = "weather";
pub const TOTAL_SIZE: usize = 25;

pub fn schema() -> RecordSchema {
    RecordSchema::new(RECORD_TYPE, TOTAL_SIZE)
        .field(FieldDescriptor::device_id("dev_eui"))
        .field(FieldDescriptor::raw("payload_type", 0, 0))
        .field(FieldDescriptor::status("status", 1, SENSOR_STATUS))
        .field(FieldDescriptor::raw("ack_id", 2, 2))
        .field(FieldDescriptor::raw("service_type", 3, 4))
        .field(FieldDescriptor::divide("temperature", 5, 6, 1))
        .field(FieldDescriptor::divide("humidity", 7, 8, 1))
        .field(FieldDescriptor::divide("wind_speed", 9, 10, 1))
        .field(FieldDescriptor::raw("wind_direction", 11, 12))
        .field(FieldDescriptor::divide("magnetic_north", 13, 14, 1))
        .field(FieldDescriptor::divide("pressure", 15, 16, 1))
        .field(FieldDescriptor::divide("rainfall", 17, 18, 2))
        .field(FieldDescriptor::divide("voltage", 19, 20, 1))
        .field(FieldDescriptor::raw("fw_service_type", 21, 22))
        .field(FieldDescriptor::firmware("fw_version", 23))
}
