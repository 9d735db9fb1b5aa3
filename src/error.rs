use thiserror::Error;

/// Top-level error type for the roof planning engine.
#[derive(Debug, Error)]
pub enum RoofError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Slope(#[from] SlopeError),

    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

impl RoofError {
    /// Returns `true` if the error was caused by the user's drawing and
    /// should be reported as bad input.
    #[must_use]
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::Slope(SlopeError::EaveMissing)
                | Self::Geometry(
                    GeometryError::DegenerateCycle(_)
                        | GeometryError::NonSimplePolygon(_)
                        | GeometryError::NonConvexCutout(_)
                )
        )
    }

    /// Returns `true` if the error comes from a misconfigured roof material.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Material(MaterialError::InvalidRoofParameters(_)))
    }
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate cycle: {0}")]
    DegenerateCycle(String),

    #[error("polygon is not simple: {0}")]
    NonSimplePolygon(String),

    #[error("cutout is not convex: {0}")]
    NonConvexCutout(String),

    #[error("zero-length segment at ({x}, {y})")]
    ZeroLength { x: f64, y: f64 },
}

/// Errors raised while orienting a slope.
#[derive(Debug, Error)]
pub enum SlopeError {
    #[error("slope has no eave and no gable or ridge to orient by")]
    EaveMissing,
}

/// Errors related to roof material parameters.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("invalid roof parameters: {0}")]
    InvalidRoofParameters(String),
}

/// Errors related to the project store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),
}

/// Errors raised while decoding transport payloads.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown line role: {0}")]
    UnknownRole(String),

    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),
}

/// Convenience type alias for results using [`RoofError`].
pub type Result<T> = std::result::Result<T, RoofError>;
