mod predictions;

pub use predictions::PredictionRepository;
