use serde::{Deserialize, Serialize};

/// Closed filtering vocabulary for job classification.
///
/// Stored documents mix `category: "govt"`, `sector: "government"` and other
/// spellings for the same thing, so raw strings stay opaque on the job and
/// only listing filters go through this enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Government,
    Private,
}

impl Sector {
    /// Lenient parse of the spellings found in stored documents.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "govt" | "government" | "gov" | "public sector" | "sarkari" => Some(Sector::Government),
            "private" | "pvt" | "private sector" => Some(Sector::Private),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Government => "govt",
            Sector::Private => "private",
        }
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Sector {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Sector::parse(s).ok_or_else(|| anyhow::anyhow!("Invalid sector: {}", s))
    }
}
