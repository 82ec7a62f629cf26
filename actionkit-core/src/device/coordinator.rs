use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{
    AuthenticationConfiguration, AuthenticationRequestParameters, ChallengeParameters,
    ChallengeResult, DeviceAuthenticator,
};
use crate::{codec, error::ActionError};

const DEVICE_CHANNEL: &str = "app";

/// Body of the fingerprint response consumed by the gateway to create the AReq.
#[derive(Serialize)]
struct AuthenticationRequestBody<'a> {
    #[serde(rename = "deviceChannel")]
    device_channel: &'static str,
    #[serde(rename = "sdkAppID")]
    sdk_app_id: &'a str,
    #[serde(rename = "sdkEncData")]
    sdk_enc_data: &'a str,
    #[serde(rename = "sdkEphemPubKey")]
    sdk_ephem_pub_key: Value,
    #[serde(rename = "sdkReferenceNumber")]
    sdk_reference_number: &'a str,
    #[serde(rename = "sdkTransID")]
    sdk_trans_id: &'a str,
}

/// Resolves `fingerprint-mobile` and `challenge-mobile` actions with a [`DeviceAuthenticator`].
pub struct DeviceAuthenticationCoordinator {
    authenticator: Arc<dyn DeviceAuthenticator>,
}

impl DeviceAuthenticationCoordinator {
    /// Creates a coordinator backed by the given 3DS SDK.
    #[must_use]
    pub fn new(authenticator: Arc<dyn DeviceAuthenticator>) -> Self {
        Self { authenticator }
    }

    /// Fingerprints the device and returns the token carrying the authentication request.
    ///
    /// # Errors
    /// - `ActionError::Decode` if `payload` is not an encoded [`AuthenticationConfiguration`].
    /// - `ActionError::Validation` if the 3DS SDK produced an empty or malformed public key
    ///   or no device data.
    /// - Failures of the 3DS SDK, with their classification preserved.
    pub async fn fingerprint(&self, payload: &str) -> Result<String, ActionError> {
        let configuration: AuthenticationConfiguration = codec::decode_base64_json(payload)?;
        log::debug!(
            "Creating authentication request for directory server {}.",
            configuration.directory_server_id
        );
        let parameters = self
            .authenticator
            .authentication_request_parameters(configuration)
            .await
            .inspect_err(|e| log::debug!("3DS SDK failed to fingerprint device: {e}."))?;
        let body = encode_request_parameters(&parameters)?;
        codec::encode_token(None, &body)
    }

    /// Performs the native challenge and returns the token carrying its outcome.
    ///
    /// No deadline is applied, the challenge UI owns the user-facing timeout.
    ///
    /// # Errors
    /// - `ActionError::Decode` if `payload` is not encoded [`ChallengeParameters`].
    /// - `ActionError::Validation` if the 3DS SDK reported a status other than `Y` or `N`.
    /// - Failures of the 3DS SDK, with their classification preserved.
    pub async fn challenge(&self, payload: &str) -> Result<String, ActionError> {
        let parameters: ChallengeParameters = codec::decode_base64_json(payload)?;
        let result = self
            .authenticator
            .perform_challenge(parameters)
            .await
            .inspect_err(|e| log::debug!("3DS SDK failed to perform challenge: {e}."))?;
        let body = encode_challenge_result(&result)?;
        codec::encode_token(None, &body)
    }
}

fn encode_challenge_result(result: &ChallengeResult) -> Result<String, ActionError> {
    let status = result.transaction_status.as_str();
    if status != ChallengeResult::AUTHENTICATED && status != ChallengeResult::NOT_AUTHENTICATED {
        log::error!("3DS SDK returned unexpected transaction status {status:?}.");
        return Err(ActionError::Validation {
            error: format!("unexpected challenge transaction status: {status:?}"),
        });
    }
    codec::encode_canonical_json(result)
}

fn encode_request_parameters(
    parameters: &AuthenticationRequestParameters,
) -> Result<String, ActionError> {
    if parameters.sdk_ephemeral_public_key.trim().is_empty() {
        log::error!("3DS SDK returned an empty ephemeral public key.");
        return Err(ActionError::Validation {
            error: "sdk ephemeral public key is empty".to_string(),
        });
    }
    // The key is re-encoded as is, its JWK members are not checked.
    let public_key: Value = serde_json::from_str(&parameters.sdk_ephemeral_public_key)
        .map_err(|e| {
            log::error!("3DS SDK returned a malformed ephemeral public key: {e}.");
            ActionError::Validation {
                error: format!("sdk ephemeral public key is not valid JSON: {e}"),
            }
        })?;
    if !public_key.is_object() {
        log::error!("3DS SDK returned an ephemeral public key that is not a JWK object.");
        return Err(ActionError::Validation {
            error: "sdk ephemeral public key is not a JSON object".to_string(),
        });
    }
    if parameters.device_data.is_empty() {
        log::error!("3DS SDK returned empty device data.");
        return Err(ActionError::Validation {
            error: "device data is empty".to_string(),
        });
    }
    let body = AuthenticationRequestBody {
        device_channel: DEVICE_CHANNEL,
        sdk_app_id: &parameters.sdk_app_id,
        sdk_enc_data: &parameters.device_data,
        sdk_ephem_pub_key: public_key,
        sdk_reference_number: &parameters.sdk_reference_number,
        sdk_trans_id: &parameters.sdk_transaction_id,
    };
    codec::encode_canonical_json(&body)
}
