//! Customer actions issued by the gateway when a payment needs further authentication.

use std::str::FromStr;

use strum::{Display, EnumString};

use crate::error::ActionError;

/// Kind of a customer action, as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, uniffi::Enum, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ActionKind {
    /// Native 3DS2 device fingerprinting. The payload is a base64 encoded configuration.
    FingerprintMobile,
    /// Native 3DS2 challenge. The payload is base64 encoded challenge parameters.
    ChallengeMobile,
    /// Browser based device fingerprinting. The payload is a URL.
    Fingerprint,
    /// Browser redirect. The payload is a URL.
    Redirect,
    /// Legacy alias of [`ActionKind::Redirect`].
    Url,
}

/// A pending action that must be resolved before the payment can proceed.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct CustomerAction {
    /// Kind of the action.
    pub kind: ActionKind,
    /// Opaque kind-specific payload.
    pub payload: String,
}

impl CustomerAction {
    /// Creates an action from the raw `type` and `value` strings of a gateway response.
    ///
    /// # Errors
    /// Returns `ActionError::Decode` if the kind is not known.
    pub fn from_raw(kind: &str, payload: impl Into<String>) -> Result<Self, ActionError> {
        let kind = ActionKind::from_str(kind).map_err(|_| ActionError::Decode {
            error: format!("unsupported customer action type: {kind}"),
        })?;
        Ok(Self {
            kind,
            payload: payload.into(),
        })
    }
}

/// Creates a [`CustomerAction`] from the raw `type` and `value` strings of a gateway response.
///
/// # Errors
/// Returns `ActionError::Decode` if the kind is not known.
#[uniffi::export]
pub fn customer_action_from_raw(
    kind: &str,
    payload: String,
) -> Result<CustomerAction, ActionError> {
    CustomerAction::from_raw(kind, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("fingerprint-mobile", ActionKind::FingerprintMobile)]
    #[test_case("challenge-mobile", ActionKind::ChallengeMobile)]
    #[test_case("fingerprint", ActionKind::Fingerprint)]
    #[test_case("redirect", ActionKind::Redirect)]
    #[test_case("url", ActionKind::Url)]
    fn test_from_raw_parses_gateway_kinds(raw: &str, expected: ActionKind) {
        let action = CustomerAction::from_raw(raw, "value").unwrap();
        assert_eq!(action.kind, expected);
        assert_eq!(action.payload, "value");
        assert_eq!(expected.to_string(), raw);
    }

    #[test]
    fn test_from_raw_rejects_unknown_kind() {
        let result = CustomerAction::from_raw("sms-otp", "value");
        assert!(matches!(result, Err(ActionError::Decode { .. })));
    }
}
