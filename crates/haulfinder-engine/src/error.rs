use thiserror::Error;

/// Failure to turn a locator into a center point.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The provider answered but could not resolve the locator
    /// (unknown ZIP, ambiguous free text). User-facing.
    #[error("could not resolve location \"{locator}\"")]
    Unresolved { locator: String },

    /// Transport, decode, or provider-side failure.
    #[error("geocoding provider failure: {0}")]
    Provider(#[source] anyhow::Error),
}

/// Terminal errors of the search pipeline. All-or-nothing: when one of
/// these surfaces, no partial result accompanies it.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The caller-supplied deadline elapsed during an external call.
    #[error("search deadline exceeded")]
    Timeout,

    /// Catalog/storage failure, passed through unmodified.
    #[error("facility catalog failure: {0}")]
    Catalog(#[source] anyhow::Error),
}
