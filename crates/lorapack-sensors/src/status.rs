//! Status bytes. Positions count from the most significant bit.

use lorapack_core::BitfieldDescriptor;

pub const SENSOR_STATUS: &str = "sensor_status";
pub const GAS_ALARM_STATUS: &str = "gas_alarm_status";

pub fn sensor_status() -> BitfieldDescriptor {
    BitfieldDescriptor::new(SENSOR_STATUS)
        .flag(0, "watch_dog")
        .flag(1, "wake_up")
        .flag(2, "ready_to_sleep")
        .flag(3, "trigger_sensor_event")
        .flag(4, "downlink_ack")
        .flag(5, "trigger_battery_status")
        .flag(6, "battery")
        .flag(7, "power")
}

pub fn gas_alarm_status() -> BitfieldDescriptor {
    BitfieldDescriptor::new(GAS_ALARM_STATUS)
        .flag(7, "o2_alarm")
        .flag(6, "h2s_alarm")
        .flag(5, "lel_alarm")
        .flag(4, "co_alarm")
        .flag(3, "power")
        .flag(2, "activate")
}

pub fn all() -> Vec<BitfieldDescriptor> {
    vec![sensor_status(), gas_alarm_status()]
}
