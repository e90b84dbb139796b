use std::collections::HashSet;

use crate::SchemaError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumMember {
    pub bit_value: i64,
    pub name: String,
    pub description: String,
}

impl EnumMember {
    pub fn new(bit_value: i64, name: &str, description: &str) -> Self {
        Self {
            bit_value,
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// Closed set of codes for one enumeration, with a mandatory fallback.
///
/// The fallback may carry a sentinel code that no device sends (`-1`), or a real
/// code (`0`). Regular members take precedence when codes collide.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumSpace {
    pub name: String,
    pub members: Vec<EnumMember>,
    pub unknown: EnumMember,
}

impl EnumSpace {
    pub fn new(name: &str, unknown: EnumMember) -> Self {
        Self {
            name: name.to_string(),
            members: Vec::new(),
            unknown,
        }
    }

    pub fn member(mut self, bit_value: i64, name: &str, description: &str) -> Self {
        self.members
            .push(EnumMember::new(bit_value, name, description));
        self
    }

    /// Regular member with `bit_value`, if any.
    pub fn lookup(&self, bit_value: i64) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.bit_value == bit_value)
    }

    /// Regular member with `bit_value`, falling back to the unknown member.
    pub fn resolve(&self, bit_value: i64) -> &EnumMember {
        self.lookup(bit_value).unwrap_or(&self.unknown)
    }

    pub fn by_name(&self, name: &str) -> Option<&EnumMember> {
        self.all().find(|m| m.name == name)
    }

    /// Regular members followed by the unknown member.
    pub fn all(&self) -> impl Iterator<Item = &EnumMember> {
        self.members.iter().chain(std::iter::once(&self.unknown))
    }

    pub fn is_unknown(&self, member: &EnumMember) -> bool {
        member.name == self.unknown.name
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        let invalid = |reason: String| SchemaError::InvalidEnumSpace {
            space: self.name.clone(),
            reason,
        };

        if self.name.is_empty() {
            return Err(invalid("enum space name must not be empty".into()));
        }
        if self.unknown.name.is_empty() {
            return Err(invalid("unknown member needs a name".into()));
        }

        let mut codes = HashSet::new();
        let mut names = HashSet::new();
        names.insert(self.unknown.name.as_str());
        for member in &self.members {
            if member.name.is_empty() {
                return Err(invalid(format!("member with code {} has no name", member.bit_value)));
            }
            if !codes.insert(member.bit_value) {
                return Err(invalid(format!("code {} is declared twice", member.bit_value)));
            }
            if !names.insert(member.name.as_str()) {
                return Err(invalid(format!("member name '{}' is declared twice", member.name)));
            }
        }
        Ok(())
    }
}
