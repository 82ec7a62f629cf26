use thiserror::Error;

/// Classification of a failure, used by hosts to decide how to present it.
///
/// A cancelled resolution must not be reported to the user as an error, so the
/// classification is kept separate from the error message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum FailureCode {
    /// Something went wrong inside the SDK (malformed gateway payload, invalid URL, etc.).
    Internal,
    /// A capability failed without a more specific classification.
    Generic,
    /// The user or the caller aborted the operation.
    Cancelled,
    /// A capability did not complete within its own deadline.
    Timeout,
    /// No network connection was available to a capability.
    NetworkUnreachable,
    /// A classification reported by a capability that the SDK does not know about.
    Unknown {
        /// The raw code as reported by the capability.
        raw_value: String,
    },
}

impl FailureCode {
    /// Returns the stable string representation of the code.
    #[must_use]
    pub fn raw_value(&self) -> String {
        match self {
            Self::Internal => "mobile.internal".to_string(),
            Self::Generic => "mobile.generic".to_string(),
            Self::Cancelled => "mobile.cancelled".to_string(),
            Self::Timeout => "mobile.timeout".to_string(),
            Self::NetworkUnreachable => "mobile.network-unreachable".to_string(),
            Self::Unknown { raw_value } => raw_value.to_lowercase(),
        }
    }
}

/// Errors reported by host-provided capabilities (device authentication, web session).
#[derive(Debug, Clone, PartialEq, Eq, Error, uniffi::Error)]
pub enum CapabilityError {
    /// The user dismissed the UI or the operation was otherwise cancelled.
    #[error("cancelled")]
    Cancelled,
    /// The capability gave up waiting (e.g. a browser session deadline).
    #[error("timeout")]
    Timeout,
    /// The capability could not reach the network.
    #[error("network_unreachable: {error}")]
    NetworkUnreachable {
        /// Details of the failure.
        error: String,
    },
    /// The capability hit an internal inconsistency.
    #[error("internal_error: {error}")]
    Internal {
        /// Details of the failure.
        error: String,
    },
    /// Unclassified capability failure.
    #[error("generic_error: {error}")]
    Generic {
        /// Details of the failure.
        error: String,
    },
    /// Failure with a classification specific to the capability implementation.
    #[error("{code}: {error}")]
    Unknown {
        /// Raw failure code.
        code: String,
        /// Details of the failure.
        error: String,
    },
    /// Unexpected `UniFFI` callback error.
    #[error("unexpected uniffi callback error: {0}")]
    UnexpectedUniFFICallbackError(String),
}

impl CapabilityError {
    /// Returns the classification of the failure.
    #[must_use]
    pub fn code(&self) -> FailureCode {
        match self {
            Self::Cancelled => FailureCode::Cancelled,
            Self::Timeout => FailureCode::Timeout,
            Self::NetworkUnreachable { .. } => FailureCode::NetworkUnreachable,
            Self::Internal { .. } => FailureCode::Internal,
            Self::Generic { .. } | Self::UnexpectedUniFFICallbackError(_) => {
                FailureCode::Generic
            }
            Self::Unknown { code, .. } => FailureCode::Unknown {
                raw_value: code.clone(),
            },
        }
    }
}

impl From<uniffi::UnexpectedUniFFICallbackError> for CapabilityError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFFICallbackError(error.reason)
    }
}

/// Error outputs from `ActionKit`
#[derive(Debug, Clone, PartialEq, Eq, Error, uniffi::Error)]
pub enum ActionError {
    /// The action payload is not valid base64 or does not decode into the expected shape.
    #[error("decode_error: {error}")]
    Decode {
        /// Stage and cause of the failure.
        error: String,
    },
    /// The data is structurally valid but a required value is empty or malformed.
    #[error("validation_error: {error}")]
    Validation {
        /// Which value failed validation.
        error: String,
    },
    /// A URL could not be parsed.
    #[error("invalid_url: {url}")]
    InvalidUrl {
        /// The offending value.
        url: String,
    },
    /// A response could not be serialized.
    #[error("encoding_error: {error}")]
    Encoding {
        /// Details of the failure.
        error: String,
    },
    /// The resolution was cancelled by the caller or by the user.
    #[error("cancelled")]
    Cancelled,
    /// A capability failed. The classification it reported is preserved.
    #[error("capability_error: {error}")]
    Capability {
        /// Classification reported by the capability.
        code: FailureCode,
        /// Message reported by the capability.
        error: String,
    },
}

impl ActionError {
    /// Returns the classification of the failure.
    #[must_use]
    pub fn code(&self) -> FailureCode {
        match self {
            Self::Decode { .. }
            | Self::Validation { .. }
            | Self::InvalidUrl { .. }
            | Self::Encoding { .. } => FailureCode::Internal,
            Self::Cancelled => FailureCode::Cancelled,
            Self::Capability { code, .. } => code.clone(),
        }
    }

    /// Whether the failure is a cancellation and should not be presented as an error.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.code() == FailureCode::Cancelled
    }
}

impl From<CapabilityError> for ActionError {
    fn from(error: CapabilityError) -> Self {
        match error {
            CapabilityError::Cancelled => Self::Cancelled,
            other => Self::Capability {
                code: other.code(),
                error: other.to_string(),
            },
        }
    }
}
