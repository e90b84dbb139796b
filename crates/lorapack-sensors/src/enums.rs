//! Enumerations carried by the sensor uplinks.

use lorapack_core::{EnumMember, EnumSpace};

pub const POSITIONING_TYPE: &str = "positioning_type";
pub const POSITIONING_SUCCESS_TYPE: &str = "positioning_success_type";
pub const CURRENT_WORKING_MODE: &str = "current_working_mode";
pub const CURRENT_AUXILIARY_OPERATION: &str = "current_auxiliary_operation";
pub const GAS_MSG_TYPE: &str = "gas_msg_type";
pub const SAFE_GAS_TYPE: &str = "safe_gas_type";
pub const SAFE_GAS_UNIT: &str = "safe_gas_unit";
pub const SAFE_GAS_ALARM_TYPE: &str = "safe_gas_alarm_type";

fn space(name: &str, unknown: (i64, &str), members: &[(i64, &str, &str)]) -> EnumSpace {
    members.iter().fold(
        EnumSpace::new(name, EnumMember::new(unknown.0, "UNKNOWN", unknown.1)),
        |space, &(code, member, description)| space.member(code, member, description),
    )
}

pub fn positioning_type() -> EnumSpace {
    space(
        POSITIONING_TYPE,
        (100, "Unknown"),
        &[
            (0, "WORKING", "Working mode positioning"),
            (1, "MAN_DOWN", "Man Down positioning"),
            (2, "DOWN_LINK", "Downlink for positioning"),
            (3, "ALERT_ALARM", "Alert alarm positioning"),
            (4, "SOS_ALARM", "SOS alarm positioning"),
        ],
    )
}

pub fn positioning_success_type() -> EnumSpace {
    space(
        POSITIONING_SUCCESS_TYPE,
        (100, "Unknown"),
        &[
            (0, "WIFI", "WIFI positioning success (Customized Format)"),
            (1, "BLUETOOTH", "Bluetooth positioning success"),
            (2, "GPS_LORA", "GPS positioning success (LoRa Cloud Customized Format)"),
            (3, "GPS_TRADITIONAL", "GPS positioning success (Traditional GPS Positioning)"),
            (4, "WIFI_LORA", "WIFI positioning success (LoRa Cloud DAS Format)"),
            (5, "GPS_LORA_DAS", "GPS positioning success (LoRa Cloud DAS Format)"),
        ],
    )
}

pub fn current_working_mode() -> EnumSpace {
    space(
        CURRENT_WORKING_MODE,
        (100, "Unknown"),
        &[
            (0, "STANDBY", "standby mode"),
            (1, "TIMING", "timing mode"),
            (2, "PERIODIC", "periodic mode"),
            (3, "STATIONARY_STATE_IN_MOTION", "stationary state in motion mode"),
            (4, "START_OF_MOVEMENT_IN_MOTION", "start of movement in motion mode"),
            (5, "IN_MOVEMENT_FOR_MOTION", "in movement for motion mode"),
            (6, "END_OF_MOVEMENT_IN_MOTION", "end of movement in motion mode"),
        ],
    )
}

pub fn current_auxiliary_operation() -> EnumSpace {
    space(
        CURRENT_AUXILIARY_OPERATION,
        (100, "Unknown"),
        &[
            (0, "NO_AUXILIARY_OPERATION", "No auxiliary operation"),
            (1, "DOWNLINK_FOR_POSITION", "Downlink for position"),
            (2, "MAN_DOWN_STATUS", "Man Down status"),
            (3, "ALERT_ALARM", "Alert alarm"),
            (4, "SOS_ALARM", "SOS alarm"),
        ],
    )
}

pub fn gas_msg_type() -> EnumSpace {
    space(
        GAS_MSG_TYPE,
        (-1, "Unknown"),
        &[
            (0, "PERIODIC", "Periodic message"),
            (1, "CO_WARNING", "CO warning"),
            (2, "LEL_WARNING", "LEL warning"),
            (3, "H2S_WARNING", "H2S warning"),
            (4, "O2_WARNING", "O2 warning"),
            (5, "CO_NORMAL", "CO normal"),
            (6, "LEL_NORMAL", "LEL normal"),
            (7, "H2S_NORMAL", "H2S normal"),
            (8, "O2_NORMAL", "O2 normal"),
            (9, "POWER_ON", "Power on"),
            (10, "POWER_OFF", "Power off"),
            (11, "HEART_BEAT", "Heart beat"),
        ],
    )
}

pub fn safe_gas_unit() -> EnumSpace {
    space(
        SAFE_GAS_UNIT,
        (-1, "Unknown"),
        &[
            (0, "PPM", "PPM"),
            (1, "PPB", "PPB"),
            (2, "PERCENT_VOL", "%VOL"),
            (3, "PERCENT_LEL", "%LEL"),
            (4, "MG_M3", "mg/m³"),
            (5, "DEG_C", "°C"),
            (6, "PERCENT_RH", "%RH"),
            (7, "G_M3", "g/m³"),
            (8, "UG_M3", "μg/m³"),
            (9, "KPA", "KPa"),
            (10, "UMOL_MOL", "μmol/mol"),
            (11, "BLANK", "Blank"),
            (12, "OU", "Odor Units (OU)"),
            (13, "UG_M3_ALT", "μg/m³ (alternative)"),
            (14, "DB", "dB"),
            (15, "LUX", "Lux"),
            (16, "MM", "mm"),
            (17, "M_S", "m/s"),
            (18, "MW_CM2", "mW/cm²"),
            (19, "NMOL_MOL", "nmol/mol"),
        ],
    )
}

/// Alarm state of a gas channel. Code 0 doubles as "disconnected".
pub fn safe_gas_alarm_type() -> EnumSpace {
    space(
        SAFE_GAS_ALARM_TYPE,
        (0, "Unknown/Disconnected"),
        &[
            (1, "NORMAL", "Normal"),
            (2, "LOW_ALARM", "Low Alarm"),
            (3, "HIGH_ALARM", "High Alarm"),
            (4, "STEL_ALARM", "STEL Alarm"),
            (5, "TWA_ALARM", "TWA Alarm"),
            (6, "LOW_BATTERY", "Low Battery Alarm"),
            (7, "ANTI_THEFT", "Anti-theft Alarm"),
            (8, "ABNORMAL", "Abnormal Alarm"),
        ],
    )
}

const SAFE_GAS_TYPES: &[(i64, &str, &str)] = &[
    (0, "NONE", "None"),
    (1, "CO", "CO"),
    (2, "H2S", "H2S"),
    (3, "O2", "O2"),
    (4, "EX", "EX"),
    (5, "SO2", "SO2"),
    (6, "NH3", "NH3"),
    (7, "H2", "H2"),
    (8, "N2", "N2"),
    (9, "O3", "O3"),
    (10, "TVOC", "TVOC"),
    (11, "CL2", "CL2"),
    (12, "HCL", "HCL"),
    (13, "NO", "NO"),
    (14, "NO2", "NO2"),
    (15, "PH3", "PH3"),
    (17, "HCN", "HCN"),
    (18, "CO2", "CO2"),
    (19, "SF6", "SF6"),
    (22, "F2", "F2"),
    (23, "HF", "HF"),
    (24, "N2O", "N2O"),
    (25, "H2O2", "H2O2"),
    (26, "NOX", "NOX"),
    (27, "SOX", "SOX"),
    (28, "ODOR", "Odor"),
    (29, "VOC", "VOC"),
    (30, "CH4", "CH4"),
    (31, "C2H6", "C2H6"),
    (32, "C3H8", "C3H8"),
    (33, "C4H10", "C4H10"),
    (34, "IC4H10", "iC4H10"),
    (35, "C5H12", "C5H12"),
    (36, "C2H4", "C2H4"),
    (37, "C3H6", "C3H6"),
    (38, "C4H8", "C4H8"),
    (39, "IC4H8", "iC4H8"),
    (40, "CH4O", "CH4O"),
    (41, "C2H6O", "C2H6O"),
    (42, "C3H8O", "C3H8O"),
    (43, "IC3H8O", "iC3H8O"),
    (44, "C4H10O", "C4H10O"),
    (45, "CH2O", "CH2O"),
    (46, "C2H4O", "C2H4O"),
    (47, "C3H6O", "C3H6O"),
    (48, "C3H4O", "C3H4O"),
    (49, "C2H2", "C2H2"),
    (50, "C6H6", "C6H6"),
    (51, "C7H8", "C7H8"),
    (52, "C8H10", "C8H10"),
    (53, "C8H8", "C8H8"),
    (54, "C6H6O", "C6H6O"),
    (55, "ETO", "ETO"),
    (56, "C2H8O2", "C2H8O2"),
    (57, "NMHC", "NMHC"),
    (58, "CH4S", "CH4S"),
    (59, "CLO2", "CLO2"),
    (60, "SO2F2", "SO2F2"),
    (61, "CS2", "CS2"),
    (63, "HC", "HC"),
    (64, "C2H6O2", "C2H6O2"),
    (65, "LEL", "LEL"),
    (68, "THC", "THC"),
    (70, "C2H6S", "C2H6S"),
    (71, "C2H6S2", "C2H6S2"),
    (72, "C3H9N", "C3H9N"),
    (74, "C2H4O2", "C2H4O2"),
    (76, "R22", "R22"),
    (78, "COCL2", "COCL2"),
    (80, "CHCO", "CHCO"),
    (81, "CHN", "CHN"),
    (83, "R32", "R32"),
    (84, "OU", "OU"),
    (85, "TEMP", "Temperature"),
    (86, "RH", "Relative Humidity"),
    (87, "PM1_0_S", "PM1.0 (Sensor)"),
    (88, "PM2_5_S", "PM2.5 (Sensor)"),
    (89, "PM10_S", "PM10 (Sensor)"),
    (90, "PM1_0_A", "PM1.0 (Air)"),
    (91, "PM2_5_A", "PM2.5 (Air)"),
    (92, "PM10_A", "PM10 (Air)"),
    (93, "MICRON_0_3", "0.3μm"),
    (94, "MICRON_0_5", "0.5μm"),
    (95, "MICRON_1_0", "1.0μm"),
    (96, "MICRON_2_5", "2.5μm"),
    (97, "MICRON_5_0", "5.0μm"),
    (98, "MICRON_10_0", "10μm"),
    (99, "VEL", "Wind Speed (VEL)"),
    (100, "WSD", "Wind Direction (WSD)"),
    (101, "NVH", "Noise Vibration Harshness (NVH)"),
    (102, "RAINFALL", "Rainfall"),
    (103, "HV", "Illumination (HV)"),
    (104, "UV", "Ultraviolet (UV)"),
    (105, "ATM", "Atmospheric Pressure (ATM)"),
    (106, "B2H6", "B2H6"),
    (107, "CH3SH", "CH3SH"),
    (108, "C3H3N", "C3H3N"),
    (109, "CH3OH", "CH3OH"),
    (110, "LPG", "LPG"),
    (111, "C4H8S", "C4H8S"),
    (112, "C2H3C2", "C2H3C2"),
    (114, "C2H3CL", "C2H3CL"),
    (115, "SO3", "SO3"),
    (116, "THT", "THT"),
    (117, "C4H8O", "C4H8O"),
    (118, "C3H6O2", "C3H6O2"),
    (119, "C4H8O2", "C4H8O2"),
    (120, "C5H10O2", "C5H10O2"),
    (122, "THF", "THF"),
    (125, "TMA", "TMA"),
];

pub fn safe_gas_type() -> EnumSpace {
    space(SAFE_GAS_TYPE, (-1, "Unknown"), SAFE_GAS_TYPES)
}

/// Every enum space the sensor schemas bind.
pub fn all() -> Vec<EnumSpace> {
    vec![
        positioning_type(),
        positioning_success_type(),
        current_working_mode(),
        current_auxiliary_operation(),
        gas_msg_type(),
        safe_gas_type(),
        safe_gas_unit(),
        safe_gas_alarm_type(),
    ]
}
