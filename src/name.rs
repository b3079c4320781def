//! The zone name label embedded in an encoded table.

use alloc::string::{String, ToString};
use core::{fmt, str::FromStr};

use crate::error::ZoneNameError;

/// A caller supplied zone name such as `America/New_York`.
///
/// The name is an opaque label. It is written into the table verbatim and is
/// never parsed or checked against a time zone database; the only requirement
/// is that it is not empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneName(String);

impl ZoneName {
    pub fn new(name: &str) -> Result<Self, ZoneNameError> {
        if name.is_empty() {
            return Err(ZoneNameError::Empty);
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ZoneName {
    type Err = ZoneNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ZoneName {
    type Error = ZoneNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ZoneNameError::Empty);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for ZoneName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
