//! Wearable safety tracker position report.
//!
//! Bytes 3 and 4 each pack two enums into their high and low nibble.

use lorapack_core::{FieldDescriptor, RecordSchema};

use crate::enums::{
    CURRENT_AUXILIARY_OPERATION, CURRENT_WORKING_MODE, POSITIONING_SUCCESS_TYPE, POSITIONING_TYPE,
};

pub const RECORD_TYPE: &str = "safety_signal";
pub const TOTAL_SIZE: usize = 14;

pub fn schema() -> RecordSchema {
    RecordSchema::new(RECORD_TYPE, TOTAL_SIZE)
        .field(FieldDescriptor::device_id("dev_eui"))
        .field(FieldDescriptor::raw("battery_level", 0, 0))
        .field(FieldDescriptor::raw("age", 1, 2))
        .field(
            FieldDescriptor::enumeration("positioning_type", 3, 3, POSITIONING_TYPE)
                .with_bit_range(0, 3),
        )
        .field(
            FieldDescriptor::enumeration(
                "positioning_success_type",
                3,
                3,
                POSITIONING_SUCCESS_TYPE,
            )
            .with_bit_range(4, 7),
        )
        .field(
            FieldDescriptor::enumeration("current_working_mode", 4, 4, CURRENT_WORKING_MODE)
                .with_bit_range(0, 3),
        )
        .field(
            FieldDescriptor::enumeration(
                "current_auxiliary_operation",
                4,
                4,
                CURRENT_AUXILIARY_OPERATION,
            )
            .with_bit_range(4, 7),
        )
        .field(FieldDescriptor::raw("positioning_data_length", 5, 5))
        .field(FieldDescriptor::divide("latitude", 6, 9, 7))
        .field(FieldDescriptor::divide("longitude", 10, 13, 7))
}
