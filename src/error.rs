/// Convenience result type used across Linemorph.
pub type LinemorphResult<T> = Result<T, LinemorphError>;

/// Top-level error taxonomy used by the crate's APIs.
#[derive(thiserror::Error, Debug)]
pub enum LinemorphError {
    /// A shape's coordinate list cannot be decomposed into segments.
    #[error("malformed shape: {0}")]
    MalformedShape(String),

    /// Invalid user-provided configuration or group data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors in animation parameters (oscillation, transition timing).
    #[error("animation error: {0}")]
    Animation(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LinemorphError {
    /// Build a [`LinemorphError::MalformedShape`] value.
    pub fn malformed_shape(msg: impl Into<String>) -> Self {
        Self::MalformedShape(msg.into())
    }

    /// Build a [`LinemorphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LinemorphError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = LinemorphError::malformed_shape("odd coordinate count");
        assert_eq!(err.to_string(), "malformed shape: odd coordinate count");

        let err = LinemorphError::validation("swap period must be > 0");
        assert!(err.to_string().starts_with("validation error:"));
    }
}
