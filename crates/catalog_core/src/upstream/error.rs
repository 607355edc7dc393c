use thiserror::Error;

/// Failure of a paginated compute-description call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("request throttled: {0}")]
    Throttled(String),

    #[error("upstream service error {code}: {message}")]
    Service { code: String, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Failure to map a selector onto concrete subnets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("no subnets matched selector")]
    NoMatchingSubnets,

    #[error("selector not supported by this resolver: {0}")]
    UnsupportedSelector(String),

    #[error("subnet lookup failed: {0}")]
    Lookup(#[from] UpstreamError),
}

/// Price lookup failure. Never fatal to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("no price known for shape {0}")]
    UnknownShape(String),

    #[error("pricing data unavailable: {0}")]
    Unavailable(String),
}
