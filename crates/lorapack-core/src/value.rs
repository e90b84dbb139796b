use core::fmt;

use crate::decimal::Decimal;
use crate::firmware::FirmwareVersion;
use crate::schema::EnumMember;

/// Decoded status byte: `(flag, set)` pairs in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusFlags {
    flags: Vec<(String, bool)>,
}

impl StatusFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, set: bool) -> Self {
        self.set(name, set);
        self
    }

    pub fn set(&mut self, name: &str, set: bool) {
        match self.flags.iter_mut().find(|(n, _)| n == name) {
            Some((_, value)) => *value = set,
            None => self.flags.push((name.to_string(), set)),
        }
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.flags
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, set)| *set)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(n, set)| (n.as_str(), *set))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FromIterator<(String, bool)> for StatusFlags {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        let mut flags = Self::new();
        for (name, set) in iter {
            flags.set(&name, set);
        }
        flags
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldValue {
    DeviceId(String),
    Integer(u64),
    Decimal(Decimal),
    Float(f32),
    Enum(EnumMember),
    Status(StatusFlags),
    Firmware(FirmwareVersion),
    Text(String),
}

impl FieldValue {
    /// Variant name, for error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DeviceId(_) => "device id",
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Float(_) => "float",
            Self::Enum(_) => "enum",
            Self::Status(_) => "status",
            Self::Firmware(_) => "firmware",
            Self::Text(_) => "text",
        }
    }

    /// Numeric view of integer and decimal values.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Integer(v) => Some(Decimal::new(*v as i128, 0)),
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumMember> {
        match self {
            Self::Enum(member) => Some(member),
            _ => None,
        }
    }

    pub fn as_status(&self) -> Option<&StatusFlags> {
        match self {
            Self::Status(flags) => Some(flags),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceId(id) | Self::Text(id) => f.write_str(id),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Enum(member) => write!(f, "{} ({})", member.name, member.bit_value),
            Self::Status(flags) => {
                let set: Vec<&str> = flags.iter().filter(|(_, s)| *s).map(|(n, _)| n).collect();
                write!(f, "[{}]", set.join(", "))
            }
            Self::Firmware(fw) => write!(f, "{fw}"),
        }
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<FirmwareVersion> for FieldValue {
    fn from(value: FirmwareVersion) -> Self {
        Self::Firmware(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Decoded record: values keyed by field name, in schema order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub record_type: String,
    pub values: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new(record_type: &str) -> Self {
        Self {
            record_type: record_type.to_string(),
            values: Vec::new(),
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value.into());
        self
    }

    /// Replaces the value of `name`, or appends it.
    pub fn set(&mut self, name: &str, value: FieldValue) {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn device_id(&self) -> Option<&str> {
        self.values.iter().find_map(|(_, v)| match v {
            FieldValue::DeviceId(id) => Some(id.as_str()),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Output of the encoder: lowercase hex identifier plus the payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodedFrame {
    pub device_id: String,
    pub payload: Vec<u8>,
}

impl EncodedFrame {
    pub fn payload_hex(&self) -> String {
        hex::encode(&self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_insertion_order() {
        let mut record = Record::new("probe")
            .with("dev_eui", FieldValue::DeviceId("ab".into()))
            .with("kind", 2u64)
            .with("temperature", Decimal::new(205, 1));
        record.set("kind", FieldValue::Integer(3));

        let names: Vec<&str> = record.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["dev_eui", "kind", "temperature"]);
        assert_eq!(record.get("kind"), Some(&FieldValue::Integer(3)));
        assert_eq!(record.device_id(), Some("ab"));
    }

    #[test]
    fn decimals_compare_numerically() {
        assert_eq!(
            FieldValue::Decimal(Decimal::new(205, 1)),
            FieldValue::Decimal(Decimal::new(2050, 2))
        );
    }

    #[test]
    fn status_display_lists_set_flags() {
        let flags = StatusFlags::new().with("power", true).with("battery", false).with("wake_up", true);
        assert_eq!(FieldValue::Status(flags).to_string(), "[power, wake_up]");
    }
}
