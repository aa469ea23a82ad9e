//! Three-component release versions (`major.minor.patch`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A release identifier. Ordering is component-wise, major first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Same major/minor, patch + 1. `None` if the patch is `u32::MAX`.
    pub fn next_patch(self) -> Option<Self> {
        let patch = self.patch.checked_add(1)?;
        Some(Self::new(self.major, self.minor, patch))
    }

    /// First patch of the next minor line. `None` on overflow.
    pub fn next_minor(self) -> Option<Self> {
        let minor = self.minor.checked_add(1)?;
        Some(Self::new(self.major, minor, 0))
    }

    /// First release of the next major line. `None` on overflow.
    pub fn next_major(self) -> Option<Self> {
        let major = self.major.checked_add(1)?;
        Some(Self::new(major, 0, 0))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Why a string could not be parsed as a [`Version`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error(
        "invalid version '{0}', expected a dot-separated version with 3 components (e.g. 3.1.2)"
    )]
    ComponentCount(String),
    #[error("invalid version '{input}': component '{component}' is not a non-negative integer")]
    Component { input: String, component: String },
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(VersionError::ComponentCount(s.to_string()));
        };
        let component = |c: &&str| {
            c.parse::<u32>().map_err(|_| VersionError::Component {
                input: s.to_string(),
                component: c.to_string(),
            })
        };
        Ok(Self::new(
            component(major)?,
            component(minor)?,
            component(patch)?,
        ))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
