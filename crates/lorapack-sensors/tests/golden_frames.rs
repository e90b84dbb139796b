use lorapack_core::{
    Codec, CodecError, Decimal, EncodeError, FieldValue, FirmwareVersion, FnProvider,
    ListProvider, Overrides, SchemaError, StatusFlags,
};
use lorapack_sensors::status::SENSOR_STATUS;
use lorapack_sensors::{default_codec, safe_gas};

const WEATHER_PAYLOAD: &str = "02d317000c025201f300e4003e09ac22891632012700092710";
const WEATHER_DEVICE: &str = "1b86fdae3d011c21";
const SAFETY_SIGNAL_PAYLOAD: &str = "02000a03200914c76e164c25d0aa5300";
const SAFETY_SIGNAL_DEVICE: &str = "fdc388ffff2a0ea1";
const SAFE_GAS_PAYLOAD: &str =
    "040322004100030000000000640000000000000014000000320000000000000000000109d277e8";
const GAS_PAYLOAD: &str = "003041a73333000000003fc0000041200000";

fn codec() -> Codec {
    let _ = env_logger::builder().is_test(true).try_init();
    default_codec().unwrap()
}

fn dec(text: &str) -> FieldValue {
    FieldValue::Decimal(text.parse::<Decimal>().unwrap())
}

fn enum_name<'a>(record: &'a lorapack_core::Record, field: &str) -> &'a str {
    record.get(field).unwrap().as_enum().unwrap().name.as_str()
}

#[test]
fn weather_decodes_documented_values() {
    let codec = codec();
    let record = codec
        .decode_hex("weather", WEATHER_PAYLOAD, WEATHER_DEVICE)
        .unwrap();

    assert_eq!(record.device_id(), Some(WEATHER_DEVICE));
    assert_eq!(record.get("payload_type"), Some(&FieldValue::Integer(2)));
    assert_eq!(record.get("ack_id"), Some(&FieldValue::Integer(23)));
    assert_eq!(record.get("service_type"), Some(&FieldValue::Integer(12)));
    assert_eq!(record.get("temperature"), Some(&dec("59.4")));
    assert_eq!(record.get("humidity"), Some(&dec("49.9")));
    assert_eq!(record.get("wind_speed"), Some(&dec("22.8")));
    assert_eq!(record.get("wind_direction"), Some(&FieldValue::Integer(62)));
    assert_eq!(record.get("magnetic_north"), Some(&dec("247.6")));
    assert_eq!(record.get("pressure"), Some(&dec("884.1")));
    assert_eq!(record.get("rainfall"), Some(&dec("56.82")));
    assert_eq!(record.get("voltage"), Some(&dec("29.5")));
    assert_eq!(record.get("fw_service_type"), Some(&FieldValue::Integer(9)));
    assert_eq!(
        record.get("fw_version"),
        Some(&FieldValue::Firmware(FirmwareVersion::new(2, 7, 16)))
    );
    assert_eq!(record.get("fw_version").unwrap().to_string(), "V2.7.16");

    let status = record.get("status").unwrap().as_status().unwrap();
    let expected = [
        ("watch_dog", true),
        ("wake_up", true),
        ("ready_to_sleep", false),
        ("trigger_sensor_event", true),
        ("downlink_ack", false),
        ("trigger_battery_status", false),
        ("battery", true),
        ("power", true),
    ];
    assert_eq!(status.iter().collect::<Vec<_>>(), expected);
}

#[test]
fn weather_reencodes_byte_exact() {
    let codec = codec();
    let record = codec
        .decode_hex("weather", WEATHER_PAYLOAD, WEATHER_DEVICE)
        .unwrap();
    let frame = codec.encode(&record).unwrap();
    assert_eq!(frame.payload_hex(), WEATHER_PAYLOAD);
    assert_eq!(frame.device_id, WEATHER_DEVICE);
}

#[test]
fn safety_signal_splits_nibbles() {
    let codec = codec();
    let record = codec
        .decode_hex("safety_signal", SAFETY_SIGNAL_PAYLOAD, SAFETY_SIGNAL_DEVICE)
        .unwrap();

    assert_eq!(record.get("battery_level"), Some(&FieldValue::Integer(2)));
    assert_eq!(record.get("age"), Some(&FieldValue::Integer(10)));
    assert_eq!(enum_name(&record, "positioning_type"), "WORKING");
    assert_eq!(
        enum_name(&record, "positioning_success_type"),
        "GPS_TRADITIONAL"
    );
    assert_eq!(enum_name(&record, "current_working_mode"), "PERIODIC");
    assert_eq!(
        enum_name(&record, "current_auxiliary_operation"),
        "NO_AUXILIARY_OPERATION"
    );
    assert_eq!(
        record.get("positioning_data_length"),
        Some(&FieldValue::Integer(9))
    );
    assert_eq!(record.get("latitude"), Some(&dec("34.8614166")));
    assert_eq!(record.get("longitude"), Some(&dec("127.7546666")));

    // Trailing bytes past the declared size are not part of the record.
    let frame = codec.encode(&record).unwrap();
    assert_eq!(frame.payload_hex(), &SAFETY_SIGNAL_PAYLOAD[..28]);
}

#[test]
fn safe_gas_decodes_and_applies_decimal_places() {
    let codec = codec();
    let record = codec
        .decode_hex("safe_gas", SAFE_GAS_PAYLOAD, "0011223344556677")
        .unwrap();

    assert_eq!(record.get("device_address"), Some(&FieldValue::Integer(4)));
    assert_eq!(record.get("function_code"), Some(&FieldValue::Integer(3)));
    assert_eq!(record.get("byte_count"), Some(&FieldValue::Integer(34)));
    assert_eq!(enum_name(&record, "type"), "LEL");
    assert_eq!(enum_name(&record, "unit"), "PERCENT_LEL");
    assert_eq!(record.get("range"), Some(&FieldValue::Integer(100)));
    assert_eq!(record.get("high_alarm_value"), Some(&FieldValue::Integer(20)));
    assert_eq!(record.get("low_alarm_value"), Some(&FieldValue::Integer(50)));
    assert_eq!(enum_name(&record, "alarm_type"), "NORMAL");
    assert_eq!(record.get("adc"), Some(&FieldValue::Integer(2514)));
    assert_eq!(record.get("crc"), Some(&FieldValue::Integer(0x77e8)));
    assert_eq!(
        safe_gas::reading(&record, "range"),
        Some(Decimal::from_int(100))
    );

    let frame = codec.encode(&record).unwrap();
    assert_eq!(frame.payload_hex(), SAFE_GAS_PAYLOAD);
}

#[test]
fn safe_gas_disconnected_alarm_round_trips() {
    let codec = codec();
    let mut payload = hex::decode(SAFE_GAS_PAYLOAD).unwrap();
    payload[34] = 0;
    let record = codec.decode("safe_gas", &payload, &[0x01]).unwrap();
    let alarm = record.get("alarm_type").unwrap().as_enum().unwrap();
    assert_eq!(alarm.name, "UNKNOWN");
    assert_eq!(alarm.description, "Unknown/Disconnected");
    assert_eq!(codec.encode(&record).unwrap().payload, payload);
}

#[test]
fn gas_decodes_floats_and_alarm_bits() {
    let codec = codec();
    let record = codec
        .decode_hex("gas", GAS_PAYLOAD, "a1b2c3d4e5f60718")
        .unwrap();

    assert_eq!(enum_name(&record, "message_type"), "PERIODIC");
    assert_eq!(record.get("o2_value"), Some(&FieldValue::Float(20.9)));
    assert_eq!(record.get("h2_value"), Some(&FieldValue::Float(0.0)));
    assert_eq!(record.get("lel_value"), Some(&FieldValue::Float(1.5)));
    assert_eq!(record.get("co_value"), Some(&FieldValue::Float(10.0)));

    let state = record.get("sensor_state").unwrap().as_status().unwrap();
    assert_eq!(state.get("power"), Some(true));
    assert_eq!(state.get("activate"), Some(true));
    assert_eq!(state.get("o2_alarm"), Some(false));
    assert_eq!(state.get("co_alarm"), Some(false));

    assert_eq!(codec.encode(&record).unwrap().payload_hex(), GAS_PAYLOAD);
}

#[test]
fn enum_by_name_and_overflow_clamp() {
    let codec = codec();
    let mut record = codec
        .decode_hex("safety_signal", SAFETY_SIGNAL_PAYLOAD, SAFETY_SIGNAL_DEVICE)
        .unwrap();

    record.set("positioning_type", FieldValue::Text("SOS_ALARM".into()));
    // Code 20 does not fit the nibble and clamps to 15.
    record.set("current_auxiliary_operation", FieldValue::Integer(20));
    let frame = codec.encode(&record).unwrap();
    assert_eq!(frame.payload[3], 0x43);
    assert_eq!(frame.payload[4], 0x2F);

    record.set("positioning_type", FieldValue::Text("LOST".into()));
    assert!(matches!(
        codec.encode(&record).unwrap_err(),
        CodecError::Encode(EncodeError::UnknownMember { .. })
    ));
}

#[test]
fn truncated_payload_is_rejected() {
    let codec = codec();
    let err = codec
        .decode_hex("weather", &WEATHER_PAYLOAD[..20], WEATHER_DEVICE)
        .unwrap_err();
    assert!(matches!(err, CodecError::Decode(_)));
}

#[test]
fn override_typos_fail_fast() {
    let codec = codec();
    let overrides = Overrides::new()
        .range("temprature", Decimal::from_int(0), Decimal::from_int(10))
        .unwrap();
    assert!(matches!(
        codec
            .random_record_with_thread_rng("weather", None, &overrides)
            .unwrap_err(),
        CodecError::Schema(SchemaError::UnknownOverrideField { .. })
    ));
}

#[test]
fn overrides_shape_random_weather() {
    let codec = codec();
    let overrides = Overrides::new()
        .list(
            "temperature",
            vec![
                dec("20.0"),
                dec("30.5"),
                dec("15.2"),
            ],
        )
        .unwrap()
        .range("payload_type", Decimal::from_int(1), Decimal::from_int(100))
        .unwrap();

    for _ in 0..32 {
        let record = codec
            .random_record_with_thread_rng("weather", Some(WEATHER_DEVICE), &overrides)
            .unwrap();
        assert_eq!(record.device_id(), Some(WEATHER_DEVICE));
        let temperature = record.get("temperature").unwrap().as_decimal().unwrap();
        assert!(["20.0", "30.5", "15.2"]
            .iter()
            .any(|t| t.parse::<Decimal>().unwrap() == temperature));
        let payload_type = record.get("payload_type").unwrap().as_decimal().unwrap();
        assert!(payload_type >= Decimal::from_int(1) && payload_type <= Decimal::from_int(100));

        let frame = codec.encode(&record).unwrap();
        let back = codec
            .decode_hex("weather", &frame.payload_hex(), &frame.device_id)
            .unwrap();
        assert_eq!(back, record);
    }
}

#[test]
fn status_type_override_applies_to_every_bound_field() {
    let codec = codec();
    let powered = StatusFlags::new().with("power", true).with("battery", true);
    let overrides = Overrides::new().for_status(
        SENSOR_STATUS,
        ListProvider::new(vec![FieldValue::Status(powered)]).unwrap(),
    );

    for _ in 0..16 {
        let record = codec
            .random_record_with_thread_rng("weather", None, &overrides)
            .unwrap();
        let status = record.get("status").unwrap().as_status().unwrap();
        let set: Vec<&str> = status.iter().filter(|(_, on)| *on).map(|(n, _)| n).collect();
        assert_eq!(set, ["battery", "power"]);
        assert_eq!(status.len(), 8);
    }
}

#[test]
fn field_override_beats_status_type_override() {
    let codec = codec();
    let overrides = Overrides::new()
        .for_status(
            SENSOR_STATUS,
            FnProvider::new(|_| FieldValue::Status(StatusFlags::new().with("power", true))),
        )
        .insert(
            "status",
            FnProvider::new(|_| FieldValue::Status(StatusFlags::new().with("watch_dog", true))),
        );

    let record = codec
        .random_record_with_thread_rng("weather", None, &overrides)
        .unwrap();
    let status = record.get("status").unwrap().as_status().unwrap();
    assert_eq!(status.get("watch_dog"), Some(true));
    assert_eq!(status.get("power"), Some(false));
}

#[test]
fn enum_space_override_applies_by_binding() {
    let codec = codec();
    let overrides = Overrides::new().for_enum(
        lorapack_sensors::enums::CURRENT_WORKING_MODE,
        ListProvider::new(vec![FieldValue::Text("TIMING".into())]).unwrap(),
    );
    let record = codec
        .random_record_with_thread_rng("safety_signal", None, &overrides)
        .unwrap();
    assert_eq!(enum_name(&record, "current_working_mode"), "TIMING");
}

#[test]
fn unregistered_type_override_fails_fast() {
    let codec = codec();
    let overrides = Overrides::new().for_status(
        "sensor_statuz",
        FnProvider::new(|_| FieldValue::Status(StatusFlags::new())),
    );
    assert_eq!(
        codec
            .random_record_with_thread_rng("weather", None, &overrides)
            .unwrap_err(),
        CodecError::Schema(SchemaError::UnknownOverrideType {
            kind: "status type",
            name: "sensor_statuz".into()
        })
    );
}
