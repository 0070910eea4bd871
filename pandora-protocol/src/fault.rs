//! Mapping of XML-RPC faults onto the remote status taxonomy.
//!
//! The service packs a symbolic status token into a `|`-separated
//! `faultString`, e.g. `com.[...].api|1199145600|AUTH_INVALID_TOKEN|...`.
//! Known tokens map to dedicated variants, everything else is carried
//! verbatim in [`Fault::Other`].

use crate::parser::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    /// The auth token was rejected; the caller may re-authenticate and retry.
    #[error("auth token rejected")]
    InvalidAuthToken,

    /// Wrong username or password.
    #[error("invalid username or password")]
    InvalidLogin,

    /// Any other remote-reported failure, surfaced verbatim.
    #[error("remote fault {code}: {message}")]
    Other { code: i64, message: String },
}

impl Fault {
    pub(crate) fn from_value(value: &Value) -> Fault {
        let code = value
            .get("faultCode")
            .and_then(Value::as_int)
            .unwrap_or(-1);
        let message = value
            .get("faultString")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        if message.split('|').any(|part| part == "AUTH_INVALID_TOKEN") {
            Fault::InvalidAuthToken
        } else if message
            .split('|')
            .any(|part| part == "AUTH_INVALID_USERNAME_PASSWORD")
        {
            Fault::InvalidLogin
        } else {
            Fault::Other { code, message }
        }
    }
}
