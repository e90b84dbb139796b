use std::collections::HashSet;

use crate::SchemaError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitFlag {
    /// 0 is the most significant bit of the status byte.
    pub position: u8,
    pub name: String,
}

/// Named boolean flags packed into one status byte.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitfieldDescriptor {
    pub name: String,
    pub flags: Vec<BitFlag>,
}

impl BitfieldDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            flags: Vec::new(),
        }
    }

    pub fn flag(mut self, position: u8, name: &str) -> Self {
        self.flags.push(BitFlag {
            position,
            name: name.to_string(),
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&BitFlag> {
        self.flags.iter().find(|f| f.name == name)
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        let invalid = |reason: String| SchemaError::InvalidStatusType {
            status: self.name.clone(),
            reason,
        };

        if self.name.is_empty() {
            return Err(invalid("status type name must not be empty".into()));
        }
        if self.flags.len() > 8 {
            return Err(invalid(format!("{} flags do not fit in one byte", self.flags.len())));
        }

        let mut positions = HashSet::new();
        let mut names = HashSet::new();
        for flag in &self.flags {
            if flag.position > 7 {
                return Err(invalid(format!(
                    "flag '{}' has bit position {}",
                    flag.name, flag.position
                )));
            }
            if !positions.insert(flag.position) {
                return Err(invalid(format!("bit position {} is used twice", flag.position)));
            }
            if flag.name.is_empty() || !names.insert(flag.name.as_str()) {
                return Err(invalid(format!("flag name '{}' is empty or repeated", flag.name)));
            }
        }
        Ok(())
    }
}
