use core::fmt;
use core::str::FromStr;

use crate::EncodeError;

/// Firmware version packed into 16 bits as `MMMM mmmm pppppppp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl FirmwareVersion {
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub const fn from_packed(raw: u16) -> Self {
        Self {
            major: ((raw >> 12) & 0x0F) as u8,
            minor: ((raw >> 8) & 0x0F) as u8,
            patch: (raw & 0xFF) as u8,
        }
    }

    pub fn to_packed(self) -> Result<u16, EncodeError> {
        if self.major > 0x0F || self.minor > 0x0F {
            return Err(EncodeError::InvalidFirmware(self.to_string()));
        }
        Ok(((self.major as u16) << 12) | ((self.minor as u16) << 8) | self.patch as u16)
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for FirmwareVersion {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || EncodeError::InvalidFirmware(s.to_string());
        let body = s.strip_prefix('V').ok_or_else(err)?;
        let mut parts = body.split('.');
        let mut component = |limit: u8| -> Result<u8, EncodeError> {
            let part = parts.next().ok_or_else(err)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err());
            }
            let value: u8 = part.parse().map_err(|_| err())?;
            if value > limit {
                return Err(err());
            }
            Ok(value)
        };
        let major = component(0x0F)?;
        let minor = component(0x0F)?;
        let patch = component(0xFF)?;
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Self::new(major, minor, patch))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FirmwareVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FirmwareVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
