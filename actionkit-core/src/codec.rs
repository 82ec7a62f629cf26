//! Wire encoding shared by every customer action.
//!
//! Gateway payloads are base64 encoded JSON, frequently without padding. Responses are
//! wrapped into a `gway_req_` token: base64 of a JSON envelope `{"body": ..., "url": ...}`
//! where `body` is itself JSON serialized to a string. The gateway compares some bodies
//! byte for byte, so every object is written with its keys in lexicographic order.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{de::DeserializeOwned, ser::SerializeMap, Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::ActionError;

/// Prefix of every token produced by the SDK.
pub const TOKEN_PREFIX: &str = "gway_req_";

/// Envelope carried (base64 encoded) by a gateway request token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEnvelope {
    /// JSON text consumed by the gateway's fingerprint/challenge response parser.
    pub body: String,
    /// URL the body relates to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Decodes a base64 encoded JSON payload, tolerating missing padding.
///
/// # Errors
/// Returns `ActionError::Decode` if the payload is not valid base64 or the decoded bytes
/// do not deserialize into `T`.
pub fn decode_base64_json<T: DeserializeOwned>(payload: &str) -> Result<T, ActionError> {
    let padding = (4 - payload.len() % 4) % 4;
    let padded = format!("{payload}{}", "=".repeat(padding));
    let data = STANDARD.decode(padded).map_err(|e| {
        log::error!("Failed to decode customer action: invalid base64 payload.");
        ActionError::Decode {
            error: format!("invalid base64 payload: {e}"),
        }
    })?;
    serde_json::from_slice(&data).map_err(|e| {
        log::error!("Unable to decode customer action: {e}.");
        ActionError::Decode {
            error: format!("unexpected payload structure: {e}"),
        }
    })
}

/// Serializes `value` to compact JSON with the keys of every object sorted.
///
/// # Errors
/// Returns `ActionError::Encoding` if `value` cannot be represented as JSON.
pub fn encode_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ActionError> {
    let value = serde_json::to_value(value).map_err(encoding_error)?;
    serde_json::to_string(&Canonical(&value)).map_err(encoding_error)
}

/// Wraps an already encoded `body` and an optional `url` into a gateway request token.
///
/// # Errors
/// Returns `ActionError::Encoding` if the envelope cannot be serialized.
pub fn encode_token(url: Option<&str>, body: &str) -> Result<String, ActionError> {
    let envelope = TokenEnvelope {
        body: body.to_string(),
        url: url.map(ToString::to_string),
    };
    let encoded = encode_canonical_json(&envelope)?;
    Ok(format!("{TOKEN_PREFIX}{}", STANDARD.encode(encoded)))
}

/// Extracts the envelope from a token produced by [`encode_token`].
///
/// # Errors
/// Returns `ActionError::Decode` if the prefix is missing or the envelope is malformed.
pub fn decode_token(token: &str) -> Result<TokenEnvelope, ActionError> {
    let encoded = token
        .strip_prefix(TOKEN_PREFIX)
        .ok_or_else(|| ActionError::Decode {
            error: format!("token does not start with {TOKEN_PREFIX}"),
        })?;
    decode_base64_json(encoded)
}

fn encoding_error(error: serde_json::Error) -> ActionError {
    log::error!("Did fail to encode gateway request: {error}.");
    ActionError::Encoding {
        error: error.to_string(),
    }
}

/// Serializes a JSON value with object keys in lexicographic order, independently of how
/// `serde_json` stores maps.
///
/// With default features `serde_json::Map` is a `BTreeMap` and is already sorted. Enabling
/// `preserve_order` anywhere in the dependency graph switches it to insertion order, which
/// would change the bytes of every token.
struct Canonical<'a>(&'a Value);

impl Serialize for Canonical<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
                let mut state = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    state.serialize_entry(key, &Canonical(value))?;
                }
                state.end()
            }
            Value::Array(items) => serializer.collect_seq(items.iter().map(Canonical)),
            other => other.serialize(serializer),
        }
    }
}
