//! Browser based authentication: 3DS redirects and web device fingerprinting.

mod coordinator;
mod throttle;

use std::time::Duration;

use serde::Deserialize;

pub use coordinator::WebRedirectCoordinator;
pub use throttle::{PresentationSlot, ThrottledWebAuthenticationSession};

use crate::error::CapabilityError;

/// How the browser session recognizes the return to the app.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, uniffi::Enum)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebAuthenticationCallback {
    /// Return URL with a custom scheme, e.g. `myapp://`.
    Scheme {
        /// The scheme, without `://`.
        scheme: String,
    },
    /// Universal link style return URL.
    Https {
        /// Host of the return URL.
        host: String,
        /// Path of the return URL.
        path: String,
    },
}

/// A request to present a browser authentication session.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct WebAuthenticationRequest {
    /// Page to load, always `http` or `https`.
    ///
    /// A gateway URL without a scheme is handed over with `https://` prepended, so
    /// `example.com` arrives as `https://example.com/`.
    pub url: String,
    /// Return URL matcher, `None` to rely on the session's default.
    pub callback: Option<WebAuthenticationCallback>,
    /// Whether the session should avoid sharing cookies with the user's browser.
    pub prefers_ephemeral_session: bool,
    /// Deadline after which the SDK abandons the session, if any.
    pub timeout: Option<Duration>,
}

/// Browser authentication capability, e.g. `ASWebAuthenticationSession` on iOS.
///
/// Only one session is presented at a time; the SDK serializes calls to `authenticate`.
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait WebAuthenticationSession: Send + Sync {
    /// Presents the browser and resolves with the callback URL the page redirected to.
    ///
    /// # Errors
    /// Returns [`CapabilityError::Cancelled`] if the user closed the browser, or any
    /// other classified failure.
    async fn authenticate(
        &self,
        request: WebAuthenticationRequest,
    ) -> Result<String, CapabilityError>;

    /// Dismisses the session currently presented, if any.
    ///
    /// Called when the SDK stops waiting for a pending `authenticate` call.
    fn dismiss(&self);
}
