use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    action::{ActionKind, CustomerAction},
    config::ResolverConfig,
    device::{DeviceAuthenticationCoordinator, DeviceAuthenticator},
    error::ActionError,
    web::{WebAuthenticationSession, WebRedirectCoordinator},
};

/// Lets a host abort an in-flight [`ActionResolver::resolve_cancellable`] call.
#[derive(Debug, Default, uniffi::Object)]
pub struct CancellationHandle(CancellationToken);

#[uniffi::export]
impl CancellationHandle {
    /// Creates a handle that is not cancelled.
    #[uniffi::constructor]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels every resolution observing this handle. Calling it again has no effect.
    pub fn cancel(&self) {
        self.0.cancel();
    }

    /// Whether [`CancellationHandle::cancel`] was called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }
}

/// Entry point of the SDK: turns a [`CustomerAction`] into the continuation token to hand
/// back to the gateway.
///
/// Browser presentations are serialized per resolver, hosts should share a single
/// instance across payments.
#[derive(uniffi::Object)]
pub struct ActionResolver {
    device: DeviceAuthenticationCoordinator,
    web: WebRedirectCoordinator,
    config: ResolverConfig,
}

#[uniffi::export(async_runtime = "tokio")]
impl ActionResolver {
    /// Creates a resolver with the default configuration.
    #[uniffi::constructor]
    #[must_use]
    pub fn new(
        device: Arc<dyn DeviceAuthenticator>,
        web_session: Arc<dyn WebAuthenticationSession>,
    ) -> Self {
        Self::with_config(device, web_session, ResolverConfig::default())
    }

    /// Creates a resolver with a custom configuration.
    #[uniffi::constructor]
    #[must_use]
    pub fn with_config(
        device: Arc<dyn DeviceAuthenticator>,
        web_session: Arc<dyn WebAuthenticationSession>,
        config: ResolverConfig,
    ) -> Self {
        let web = WebRedirectCoordinator::new(
            web_session,
            config.presentation_interval,
            config.web_authentication_callback.clone(),
            config.prefers_ephemeral_web_session,
        );
        Self {
            device: DeviceAuthenticationCoordinator::new(device),
            web,
            config,
        }
    }

    /// Resolves `action` and returns the continuation token.
    ///
    /// # Errors
    /// - `ActionError::Decode`, `ActionError::Validation` or `ActionError::InvalidUrl` if the
    ///   gateway sent a malformed payload.
    /// - `ActionError::Cancelled` if the user aborted the authentication.
    /// - `ActionError::Capability` if a capability failed.
    pub async fn resolve(&self, action: CustomerAction) -> Result<String, ActionError> {
        log::debug!("Resolving {} action.", action.kind);
        let result = match action.kind {
            ActionKind::FingerprintMobile => self.device.fingerprint(&action.payload).await,
            ActionKind::ChallengeMobile => self.device.challenge(&action.payload).await,
            ActionKind::Fingerprint => {
                self.web
                    .fingerprint(&action.payload, self.config.web_fingerprint_timeout)
                    .await
            }
            ActionKind::Redirect | ActionKind::Url => self.web.redirect(&action.payload).await,
        };
        match &result {
            Ok(_) => log::debug!("Resolved {} action.", action.kind),
            Err(e) if e.is_cancelled() => log::info!("{} action was cancelled.", action.kind),
            Err(e) => log::debug!("Failed to resolve {} action: {e}.", action.kind),
        }
        result
    }

    /// Same as [`ActionResolver::resolve`], but stops as soon as `cancellation` fires.
    ///
    /// A browser session still on screen at that point is dismissed.
    ///
    /// # Errors
    /// See [`ActionResolver::resolve`]. Returns `ActionError::Cancelled` once `cancellation`
    /// fires.
    pub async fn resolve_cancellable(
        &self,
        action: CustomerAction,
        cancellation: Arc<CancellationHandle>,
    ) -> Result<String, ActionError> {
        let kind = action.kind;
        tokio::select! {
            biased;
            () = cancellation.0.cancelled() => {
                log::info!("{kind} action was cancelled by the host.");
                Err(ActionError::Cancelled)
            }
            result = self.resolve(action) => result,
        }
    }
}
