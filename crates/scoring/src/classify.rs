/// Keyword sets matching the discipline labels published by bases.athle.fr.
/// Comparison happens on the uppercased event name (text before the first "/").
const THROW_KEYWORDS: [&str; 4] = ["JAVELOT", "POIDS", "DISQUE", "MARTEAU"];
const JUMP_KEYWORDS: [&str; 4] = ["HAUTEUR", "PERCHE", "LONGUEUR", "TRIPLE"];

/// Relay sections ("4 X 100m", ...) are excluded from scoring entirely.
pub const RELAY_MARKER: &str = "4 X";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    Throw,
    Jump,
    Race,
}

impl Family {
    /// Categorizes an event name into its discipline family. Total: every
    /// non-throw, non-jump label is a race (relays are filtered out before
    /// classification ever runs).
    pub fn classify(event_name: &str) -> Family {
        let event = event_name
            .split('/')
            .next()
            .unwrap_or("")
            .trim()
            .to_uppercase();

        if THROW_KEYWORDS.iter().any(|kw| event.contains(kw)) {
            Family::Throw
        } else if JUMP_KEYWORDS.iter().any(|kw| event.contains(kw)) {
            Family::Jump
        } else {
            Family::Race
        }
    }

    /// Throws and jumps are measured: athletes without a valid attempt have
    /// an empty performance cell and must not enter scoring.
    pub fn is_measured(&self) -> bool {
        matches!(self, Family::Throw | Family::Jump)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Throw => "Lancers",
            Self::Jump => "Sauts",
            Self::Race => "Courses",
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    /// Reads the gender letter out of a discipline label.
    ///
    /// Precondition on the upstream format: labels look like
    /// "100m / TCM" or "Javelot / TCF" -- the gender is the third character
    /// of the segment after the "/". Labels that do not follow this shape
    /// yield `None`; the caller decides whether that is an error.
    pub fn from_label(label: &str) -> Option<Gender> {
        let segment = label.splitn(2, '/').nth(1)?.trim();
        match segment.chars().nth(2)? {
            'M' => Some(Gender::M),
            'F' => Some(Gender::F),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M => "M",
            Self::F => "F",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
