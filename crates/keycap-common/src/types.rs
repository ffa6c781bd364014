use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operating system family used to pick key names and display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OsType {
    #[serde(rename = "macos")]
    MacOs,
    Windows,
    Linux,
    #[default]
    Unknown,
}

impl OsType {
    /// The OS this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Unknown
        }
    }

    pub fn is_macos(self) -> bool {
        self == Self::MacOs
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "macos" | "mac" | "darwin" | "osx" => Ok(Self::MacOs),
            "windows" | "win" => Ok(Self::Windows),
            "linux" => Ok(Self::Linux),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unknown os type: {other}")),
        }
    }
}
