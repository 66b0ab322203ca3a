//! Verbosity and tone presets.

use std::fmt;

/// Preset that selects the guidance text embedded in the prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Brief and direct.
    Quick,
    /// Clear and balanced. Used when the caller does not pick one.
    #[default]
    Normal,
    /// Simple words and a friendly tone for a young reader.
    Kid,
}

impl Mode {
    /// All presets, in the order they are offered to callers.
    pub const ALL: [Mode; 3] = [Mode::Quick, Mode::Normal, Mode::Kid];

    /// Lowercase name, as accepted by [`str::parse`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Normal => "normal",
            Self::Kid => "kid",
        }
    }

    /// Guidance sentence interpolated into the prompt.
    pub fn guidance(self) -> &'static str {
        match self {
            Self::Quick => "Be brief and direct. Use the shortest helpful wording.",
            Self::Normal => "Be clear and balanced. Keep it easy to read.",
            Self::Kid => "Explain like I'm 12. Use very simple words and friendly tone.",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    /// Case-sensitive: only the exact lowercase names are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quick" => Ok(Self::Quick),
            "normal" => Ok(Self::Normal),
            "kid" => Ok(Self::Kid),
            _ => Err(format!("unknown mode: {} (use quick, normal, or kid)", s)),
        }
    }
}
