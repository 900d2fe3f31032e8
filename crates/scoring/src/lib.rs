pub mod classify;
pub mod club;
pub mod coefficients;
pub mod engine;
pub mod error;
pub mod parser;
pub mod podium;
pub mod sources;
pub mod traits;

pub use classify::{Family, Gender};
pub use club::{ClubRow, filter_club};
pub use coefficients::{CoefficientTable, compute_coefficients};
pub use engine::{ScoreEntry, leaderboard, score};
pub use error::{Result, ScoringError};
pub use parser::{RawRow, ResultRow, parse};
pub use podium::{Discipline, Podium, PodiumTable, build_podiums};
pub use traits::ResultsSource;

// Re-export bases.athle.fr source types
pub use sources::basathle::{
    BaseAthleClient, BaseAthleSource, CompetitionConfig, CompetitionId, CompetitionRegistry,
};
