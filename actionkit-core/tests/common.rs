//! Common test utilities shared across integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actionkit_core::{
    AuthenticationConfiguration, AuthenticationRequestParameters, CapabilityError,
    ChallengeParameters, ChallengeResult, DeviceAuthenticator, WebAuthenticationRequest,
    WebAuthenticationSession,
};
use tokio::time::Instant;

/// `{"directoryServerID":"1","directoryServerPublicKey":"2","threeDSServerTransID":"3","messageVersion":"4"}`
pub const FINGERPRINT_PAYLOAD: &str = "eyJkaXJlY3RvcnlTZXJ2ZXJJRCI6IjEiLCJkaXJlY3RvcnlTZXJ2ZXJQdWJsaWNLZXkiOiIyIiwidGhyZWVEU1NlcnZlclRyYW5zSUQiOiIzIiwibWVzc2FnZVZlcnNpb24iOiI0In0";

/// Same shape as [`FINGERPRINT_PAYLOAD`] plus `directoryServerRootCAs` and `scheme`, unpadded.
pub const FULL_FINGERPRINT_PAYLOAD: &str = "eyJkaXJlY3RvcnlTZXJ2ZXJJRCI6IjEiLCJkaXJlY3RvcnlTZXJ2ZXJQdWJsaWNLZXkiOiIyIiwiZGlyZWN0b3J5U2VydmVyUm9vdENBcyI6WyIzIl0sInRocmVlRFNTZXJ2ZXJUcmFuc0lEIjoiNCIsInNjaGVtZSI6IjUiLCJtZXNzYWdlVmVyc2lvbiI6IjYifQ";

/// `{"acsTransID":"1","acsReferenceNumber":"2","acsSignedContent":"3","threeDSServerTransID":"4"}`
pub const CHALLENGE_PAYLOAD: &str = "eyJhY3NUcmFuc0lEIjoiMSIsImFjc1JlZmVyZW5jZU51bWJlciI6IjIiLCJhY3NTaWduZWRDb250ZW50IjoiMyIsInRocmVlRFNTZXJ2ZXJUcmFuc0lEIjoiNCJ9";

pub fn request_parameters(public_key: &str) -> AuthenticationRequestParameters {
    AuthenticationRequestParameters {
        device_data: "1".to_string(),
        sdk_app_id: "2".to_string(),
        sdk_ephemeral_public_key: public_key.to_string(),
        sdk_reference_number: "3".to_string(),
        sdk_transaction_id: "4".to_string(),
    }
}

/// 3DS SDK double returning canned results and recording what it received.
pub struct MockDeviceAuthenticator {
    fingerprint_result: Result<AuthenticationRequestParameters, CapabilityError>,
    challenge_result: Result<ChallengeResult, CapabilityError>,
    hangs: bool,
    pub configurations: Mutex<Vec<AuthenticationConfiguration>>,
    pub challenges: Mutex<Vec<ChallengeParameters>>,
}

impl MockDeviceAuthenticator {
    pub fn new(
        fingerprint_result: Result<AuthenticationRequestParameters, CapabilityError>,
        challenge_result: Result<ChallengeResult, CapabilityError>,
    ) -> Arc<Self> {
        Arc::new(Self {
            fingerprint_result,
            challenge_result,
            hangs: false,
            configurations: Mutex::new(Vec::new()),
            challenges: Mutex::new(Vec::new()),
        })
    }

    pub fn succeeding() -> Arc<Self> {
        Self::new(
            Ok(request_parameters(r#"{"kty":"EC"}"#)),
            Ok(ChallengeResult::new(true)),
        )
    }

    /// Records every call, then never completes.
    pub fn hanging() -> Arc<Self> {
        Arc::new(Self {
            fingerprint_result: Ok(request_parameters(r#"{"kty":"EC"}"#)),
            challenge_result: Ok(ChallengeResult::new(true)),
            hangs: true,
            configurations: Mutex::new(Vec::new()),
            challenges: Mutex::new(Vec::new()),
        })
    }

    pub fn fingerprint_calls(&self) -> usize {
        self.configurations.lock().unwrap().len()
    }

    pub fn challenge_calls(&self) -> usize {
        self.challenges.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl DeviceAuthenticator for MockDeviceAuthenticator {
    async fn authentication_request_parameters(
        &self,
        configuration: AuthenticationConfiguration,
    ) -> Result<AuthenticationRequestParameters, CapabilityError> {
        self.configurations.lock().unwrap().push(configuration);
        if self.hangs {
            std::future::pending::<()>().await;
        }
        self.fingerprint_result.clone()
    }

    async fn perform_challenge(
        &self,
        parameters: ChallengeParameters,
    ) -> Result<ChallengeResult, CapabilityError> {
        self.challenges.lock().unwrap().push(parameters);
        if self.hangs {
            std::future::pending::<()>().await;
        }
        self.challenge_result.clone()
    }
}

/// What a [`ScriptedWebSession`] does with the next presentation.
#[derive(Clone)]
pub enum WebReply {
    /// Redirects to the callback URL after the delay.
    Callback(Duration, String),
    /// Fails after the delay.
    Fail(Duration, CapabilityError),
    /// Stays on screen until dismissed.
    Hang,
}

/// Browser double replaying scripted replies, one per presentation.
pub struct ScriptedWebSession {
    replies: Mutex<VecDeque<WebReply>>,
    pub requests: Mutex<Vec<WebAuthenticationRequest>>,
    pub presentations: Mutex<Vec<(Instant, Option<Instant>)>>,
    dismissals: AtomicUsize,
}

impl ScriptedWebSession {
    pub fn new(replies: impl IntoIterator<Item = WebReply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            presentations: Mutex::new(Vec::new()),
            dismissals: AtomicUsize::new(0),
        })
    }

    pub fn unused() -> Arc<Self> {
        Self::new([])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn dismissals(&self) -> usize {
        self.dismissals.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl WebAuthenticationSession for ScriptedWebSession {
    async fn authenticate(
        &self,
        request: WebAuthenticationRequest,
    ) -> Result<String, CapabilityError> {
        let index = {
            let mut presentations = self.presentations.lock().unwrap();
            presentations.push((Instant::now(), None));
            presentations.len() - 1
        };
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected web presentation");
        let result = match reply {
            WebReply::Callback(delay, url) => {
                tokio::time::sleep(delay).await;
                Ok(url)
            }
            WebReply::Fail(delay, error) => {
                tokio::time::sleep(delay).await;
                Err(error)
            }
            WebReply::Hang => std::future::pending().await,
        };
        self.presentations.lock().unwrap()[index].1 = Some(Instant::now());
        result
    }

    fn dismiss(&self) {
        self.dismissals.fetch_add(1, Ordering::SeqCst);
    }
}
