use serde::Deserialize;

/// Response of `auth/v3/tenant_access_token/internal`.
///
/// Unlike the rest of the API this endpoint does not wrap its payload in
/// the standard `{code, msg, data}` envelope; the token and expiry sit
/// next to the status fields.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub tenant_access_token: Option<String>,
    /// Remaining validity in seconds, as reported by the server. The
    /// client does not track expiry; a token is acquired once per client
    /// lifetime.
    #[serde(default)]
    pub expire: Option<i64>,
}
