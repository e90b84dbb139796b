//! Fixed gas transmitter frame, 39 bytes.
//!
//! The concentration and alarm thresholds are raw integers. `decimal_places`
//! says where the decimal point sits; [`reading`] applies it.

use lorapack_core::decimal::MAX_SCALE;
use lorapack_core::{Decimal, FieldDescriptor, Record, RecordSchema};

use crate::enums::{SAFE_GAS_ALARM_TYPE, SAFE_GAS_TYPE, SAFE_GAS_UNIT};

pub const RECORD_TYPE: &str = "safe_gas";
pub const TOTAL_SIZE: usize = 39;

pub fn schema() -> RecordSchema {
    RecordSchema::new(RECORD_TYPE, TOTAL_SIZE)
        .field(FieldDescriptor::device_id("dev_eui"))
        .field(FieldDescriptor::raw("device_address", 0, 0))
        .field(FieldDescriptor::raw("function_code", 1, 1))
        .field(FieldDescriptor::raw("byte_count", 2, 2))
        .field(FieldDescriptor::enumeration("type", 3, 4, SAFE_GAS_TYPE))
        .field(FieldDescriptor::enumeration("unit", 5, 6, SAFE_GAS_UNIT))
        .field(FieldDescriptor::raw("decimal_places", 7, 8))
        .field(FieldDescriptor::raw("range", 9, 12))
        .field(FieldDescriptor::raw("value", 13, 16))
        .field(FieldDescriptor::raw("high_alarm_value", 17, 20))
        .field(FieldDescriptor::raw("low_alarm_value", 21, 24))
        .field(FieldDescriptor::raw("stel_alarm_value", 25, 28))
        .field(FieldDescriptor::raw("twa_alarm_value", 29, 32))
        .field(FieldDescriptor::enumeration("alarm_type", 33, 34, SAFE_GAS_ALARM_TYPE))
        .field(FieldDescriptor::raw("adc", 35, 36))
        .field(FieldDescriptor::raw("crc", 37, 38))
}

/// `field` of a decoded safe gas record with `decimal_places` applied.
///
/// Returns `None` when either field is missing or not an integer, or when the
/// decimal place count is beyond what [`Decimal`] can carry.
pub fn reading(record: &Record, field: &str) -> Option<Decimal> {
    let places = record.get("decimal_places")?.as_decimal()?.to_integer()?;
    if places > i128::from(MAX_SCALE) {
        return None;
    }
    let raw = record.get(field)?.as_decimal()?;
    raw.shift(-(places as i32))
}
