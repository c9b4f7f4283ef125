use thiserror::Error;

/// Catalog ingestion failures. Schema problems are fatal and abort the
/// request before any scoring happens.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog missing required column: {0}")]
    MissingColumn(String),
    #[error("row {row}: column {column} is not numeric: {value:?}")]
    InvalidNumeric { column: String, row: usize, value: String },
}

/// Collaborator failures reported by a [`crate::predictor::Predictor`].
///
/// The facade pipeline treats these as fail-soft: the affected record is
/// dropped from consideration rather than failing the whole request.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PredictionError {
    #[error("prediction failed for material {material_id}: {reason}")]
    Failed { material_id: String, reason: String },
    #[error("prediction timed out for material {material_id}")]
    TimedOut { material_id: String },
}

/// Ranking failures surfaced to the caller.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RankError {
    /// Filtering or selection left zero eligible records. Distinct from a
    /// panic on a missing first element: callers get a typed condition.
    #[error("no eligible material for these constraints")]
    NoEligibleMaterial,
    /// A constraint value could not be parsed as the expected type.
    #[error("constraint {field} could not be parsed from {value:?}")]
    InvalidConstraint { field: String, value: String },
}
