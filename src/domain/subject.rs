use serde::{Deserialize, Serialize};

/// A quiz subject offered by the academy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    /// Mathematics
    Maths,
    /// English comprehension and grammar
    English,
    /// Verbal reasoning
    Vr,
    /// Non-verbal reasoning
    Nvr,
}

impl Subject {
    /// All subjects, in dashboard display order
    pub const ALL: [Subject; 4] = [Self::Maths, Self::English, Self::Vr, Self::Nvr];

    /// Get the identifier string used in storage and on the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maths => "maths",
            Self::English => "english",
            Self::Vr => "vr",
            Self::Nvr => "nvr",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "maths" | "math" => Some(Self::Maths),
            "english" => Some(Self::English),
            "vr" => Some(Self::Vr),
            "nvr" => Some(Self::Nvr),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Maths => "Maths",
            Self::English => "English",
            Self::Vr => "Verbal Reasoning",
            Self::Nvr => "Non-Verbal Reasoning",
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
