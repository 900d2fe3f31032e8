use std::collections::HashMap;

use crate::error::ScoringError;

/// Facts about one competition the results site cannot tell us: where the
/// listing lives, how many pages it spans, how many leading rows each page
/// wastes on banners, and which club we are scoring.
#[derive(Debug, Clone)]
pub struct CompetitionConfig {
    pub id: CompetitionId,
    pub results_url: String,
    pub page_count: u32,
    /// Leading table rows to skip on the first page.
    pub first_page_skip: usize,
    /// Leading table rows to skip on every following page.
    pub page_skip: usize,
    pub club_prefix: String,
}

impl CompetitionConfig {
    pub fn skip_for_page(&self, page: u32) -> usize {
        if page == 0 {
            self.first_page_skip
        } else {
            self.page_skip
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompetitionId {
    Interclubs2025Round2,
}

impl CompetitionId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interclubs2025Round2 => "interclubs-2025-tour-2",
        }
    }

    pub fn all() -> &'static [CompetitionId] {
        &[Self::Interclubs2025Round2]
    }

    fn parse_str(s: &str) -> Result<Self, ScoringError> {
        let normalized = s.to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "interclubs-2025-tour-2" | "interclubs2025tour2" | "interclubs" => {
                Ok(Self::Interclubs2025Round2)
            }
            _ => Err(ScoringError::ConfigError(format!(
                "Unknown competition: '{}'. Available: {}",
                s,
                Self::all()
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

impl TryFrom<&str> for CompetitionId {
    type Error = ScoringError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse_str(value)
    }
}

impl std::str::FromStr for CompetitionId {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for CompetitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registry of predefined competitions. Page counts and skip offsets are
/// recorded here, never inferred from the pages themselves.
pub struct CompetitionRegistry {
    competitions: HashMap<CompetitionId, CompetitionConfig>,
}

impl CompetitionRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            competitions: HashMap::new(),
        };

        registry.register(CompetitionConfig {
            id: CompetitionId::Interclubs2025Round2,
            results_url: "https://bases.athle.fr/asp.net/liste.aspx?frmbase=resultats\
                          &frmmode=1&frmespace=0&frmcompetition=304693"
                .to_string(),
            page_count: 5,
            first_page_skip: 3,
            page_skip: 2,
            club_prefix: "Stade Rennais Athletisme".to_string(),
        });

        registry
    }

    fn register(&mut self, config: CompetitionConfig) {
        self.competitions.insert(config.id, config);
    }

    pub fn get_config(&self, id: CompetitionId) -> Option<&CompetitionConfig> {
        self.competitions.get(&id)
    }

    pub fn list_competitions(&self) -> Vec<CompetitionId> {
        self.competitions.keys().copied().collect()
    }
}

impl Default for CompetitionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
