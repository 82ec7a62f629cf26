use serde::{Deserialize, Serialize};

/// Configuration required by the 3DS SDK to create an authentication request.
///
/// Decoded from the payload of a `fingerprint-mobile` action. Older gateway revisions
/// omit the root certificates and the scheme, so both are optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, uniffi::Record)]
pub struct AuthenticationConfiguration {
    /// Identifier of the directory server to use during the transaction creation phase.
    #[serde(rename = "directoryServerID")]
    pub directory_server_id: String,
    /// Public key of the directory server.
    #[serde(rename = "directoryServerPublicKey")]
    pub directory_server_public_key: String,
    /// DER encoded x509 certificates of the directory server root, used for signature checks.
    #[serde(
        rename = "directoryServerRootCAs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub directory_server_root_certificates: Option<Vec<String>>,
    /// Identifier of the authentication assigned by the 3DS server.
    #[serde(rename = "threeDSServerTransID")]
    pub directory_server_transaction_id: String,
    /// Card scheme of the card used to initiate the payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// 3DS protocol version identifier.
    #[serde(rename = "messageVersion")]
    pub message_version: String,
}

/// Challenge data sent by the ACS, decoded from a `challenge-mobile` action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, uniffi::Record)]
pub struct ChallengeParameters {
    /// Transaction identifier assigned by the ACS.
    #[serde(rename = "acsTransID")]
    pub acs_transaction_id: String,
    /// Reference number of the ACS.
    #[serde(rename = "acsReferenceNumber")]
    pub acs_reference_number: String,
    /// JWS signed by the ACS.
    #[serde(rename = "acsSignedContent")]
    pub acs_signed_content: String,
    /// Transaction identifier assigned by the 3DS server.
    #[serde(rename = "threeDSServerTransID")]
    pub three_ds_server_transaction_id: String,
}

/// Device data produced by the 3DS SDK, sent to the gateway to create the AReq.
#[derive(Debug, Clone, PartialEq, Eq, Hash, uniffi::Record)]
pub struct AuthenticationRequestParameters {
    /// Encrypted device data.
    pub device_data: String,
    /// Identifier of the SDK installation.
    pub sdk_app_id: String,
    /// Ephemeral public key of the SDK, a JSON Web Key serialized as text.
    pub sdk_ephemeral_public_key: String,
    /// Reference number of the SDK assigned by EMVCo.
    pub sdk_reference_number: String,
    /// Transaction identifier assigned by the SDK.
    pub sdk_transaction_id: String,
}

/// Outcome of a native challenge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, uniffi::Record)]
pub struct ChallengeResult {
    /// Transaction status, `"Y"` when the cardholder was authenticated.
    #[serde(rename = "transStatus")]
    pub transaction_status: String,
}

impl ChallengeResult {
    /// Status of an authenticated transaction.
    pub const AUTHENTICATED: &'static str = "Y";
    /// Status of a transaction that was not authenticated.
    pub const NOT_AUTHENTICATED: &'static str = "N";

    /// Creates a result from the boolean outcome of a challenge.
    #[must_use]
    pub fn new(authenticated: bool) -> Self {
        let status = if authenticated {
            Self::AUTHENTICATED
        } else {
            Self::NOT_AUTHENTICATED
        };
        Self {
            transaction_status: status.to_string(),
        }
    }
}

impl From<bool> for ChallengeResult {
    fn from(authenticated: bool) -> Self {
        Self::new(authenticated)
    }
}
