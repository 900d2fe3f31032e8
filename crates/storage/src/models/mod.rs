pub(crate) mod prediction;

pub use prediction::{Prediction, PredictionKind, UnknownPredictionKind};
