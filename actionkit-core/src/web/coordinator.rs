use std::{borrow::Cow, sync::Arc, time::Duration};

use url::Url;

use super::{
    ThrottledWebAuthenticationSession, WebAuthenticationCallback, WebAuthenticationRequest,
    WebAuthenticationSession,
};
use crate::{
    codec,
    error::{ActionError, CapabilityError},
};

/// Body sent to the gateway when browser fingerprinting did not finish in time.
const FINGERPRINT_TIMEOUT_BODY: &str = r#"{ "threeDS2FingerprintTimeout": true }"#;

/// Query item of the callback URL carrying the continuation value.
const TOKEN_QUERY_ITEM: &str = "token";

/// Resolves `fingerprint` and `redirect` actions by presenting a browser session.
pub struct WebRedirectCoordinator {
    session: ThrottledWebAuthenticationSession,
    callback: Option<WebAuthenticationCallback>,
    prefers_ephemeral_session: bool,
}

impl WebRedirectCoordinator {
    /// Creates a coordinator presenting `session` at most once at a time.
    #[must_use]
    pub fn new(
        session: Arc<dyn WebAuthenticationSession>,
        presentation_interval: Duration,
        callback: Option<WebAuthenticationCallback>,
        prefers_ephemeral_session: bool,
    ) -> Self {
        Self {
            session: ThrottledWebAuthenticationSession::new(session, presentation_interval),
            callback,
            prefers_ephemeral_session,
        }
    }

    /// Loads the fingerprinting page and returns the continuation value.
    ///
    /// If the page does not redirect back within `deadline` of being presented, the session
    /// is dismissed and a token telling the gateway that fingerprinting timed out is returned
    /// instead. Time spent waiting for another presentation to end does not count.
    ///
    /// # Errors
    /// - `ActionError::InvalidUrl` if `url` or the callback URL can't be parsed.
    /// - Failures of the web session other than a timeout.
    pub async fn fingerprint(&self, url: &str, deadline: Duration) -> Result<String, ActionError> {
        let target = parse_url(url)?;
        let request = self.request(&target, Some(deadline));
        // The deadline starts once the session is on screen, not while queued.
        let slot = self.session.acquire().await;
        let outcome = tokio::time::timeout(deadline, slot.present(request))
            .await
            .unwrap_or(Err(CapabilityError::Timeout));
        match outcome {
            Ok(callback_url) => continuation_value(&callback_url),
            Err(CapabilityError::Timeout) => {
                log::warn!("Device fingerprinting did not complete within {deadline:?}.");
                codec::encode_token(Some(url), FINGERPRINT_TIMEOUT_BODY)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Presents the redirect page and returns the continuation value.
    ///
    /// # Errors
    /// - `ActionError::InvalidUrl` if `url` or the callback URL can't be parsed.
    /// - Failures of the web session.
    pub async fn redirect(&self, url: &str) -> Result<String, ActionError> {
        let target = parse_url(url)?;
        let callback_url = self.session.authenticate(self.request(&target, None)).await?;
        continuation_value(&callback_url)
    }

    fn request(&self, url: &Url, timeout: Option<Duration>) -> WebAuthenticationRequest {
        WebAuthenticationRequest {
            url: url.to_string(),
            callback: self.callback.clone(),
            prefers_ephemeral_session: self.prefers_ephemeral_session,
            timeout,
        }
    }
}

/// Parses an action URL. Gateways sometimes omit the scheme, `https` is assumed then.
fn parse_url(raw: &str) -> Result<Url, ActionError> {
    let parsed = match Url::parse(raw) {
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{raw}")),
        other => other,
    };
    match parsed {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => {
            log::error!("Unable to create URL from string: {raw}.");
            Err(ActionError::InvalidUrl {
                url: raw.to_string(),
            })
        }
    }
}

/// Extracts the `token` query item of the callback URL.
///
/// `+` is kept as is: tokens are base64 and the gateway does not form-encode them.
fn continuation_value(callback_url: &str) -> Result<String, ActionError> {
    let invalid_url = || ActionError::InvalidUrl {
        url: callback_url.to_string(),
    };
    let url = Url::parse(callback_url).map_err(|e| {
        log::error!("Web session returned malformed callback URL: {e}.");
        invalid_url()
    })?;
    let value = url.query().and_then(|query| {
        query.split('&').find_map(|item| {
            let (name, value) = item.split_once('=').unwrap_or((item, ""));
            (name == TOKEN_QUERY_ITEM).then_some(value)
        })
    });
    let Some(value) = value else {
        log::warn!("Callback URL has no {TOKEN_QUERY_ITEM} query item.");
        return Ok(String::new());
    };
    urlencoding::decode(value)
        .map(Cow::into_owned)
        .map_err(|_| invalid_url())
}
