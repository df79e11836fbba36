use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A value outside a closed enumeration (KSI axis, taxonomy, component).
    #[error("unknown {kind}: {value}")]
    InvalidEnum { kind: &'static str, value: String },
    #[error("confidence {value} is outside [0, 1]")]
    ConfidenceOutOfRange { value: f64 },
}

impl ModelError {
    pub(crate) fn invalid(kind: &'static str, value: &str) -> Self {
        Self::InvalidEnum {
            kind,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
