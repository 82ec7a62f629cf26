//! Native 3DS2 authentication through a host-provided 3DS SDK.

mod coordinator;
mod types;

pub use coordinator::DeviceAuthenticationCoordinator;
pub use types::{
    AuthenticationConfiguration, AuthenticationRequestParameters, ChallengeParameters,
    ChallengeResult,
};

use crate::error::CapabilityError;

/// Device authentication capability, usually backed by a third-party 3DS2 SDK.
///
/// Implementations are expected to already classify their failures, e.g. by reporting
/// [`CapabilityError::Cancelled`] when the user closes the challenge UI. Calls may run
/// concurrently.
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait DeviceAuthenticator: Send + Sync {
    /// Fingerprints the device and creates the parameters of the authentication request.
    ///
    /// # Errors
    /// Returns an error if the 3DS SDK can't be initialized or fingerprinting fails.
    async fn authentication_request_parameters(
        &self,
        configuration: AuthenticationConfiguration,
    ) -> Result<AuthenticationRequestParameters, CapabilityError>;

    /// Presents the native challenge and reports whether the cardholder was authenticated.
    ///
    /// # Errors
    /// Returns an error if the challenge could not be performed.
    async fn perform_challenge(
        &self,
        parameters: ChallengeParameters,
    ) -> Result<ChallengeResult, CapabilityError>;
}
