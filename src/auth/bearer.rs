//! Bearer token validation.

/// The scheme literal expected in front of the token.
const BEARER_SCHEME: &str = "Bearer";

/// Validates inbound credentials against the single configured token.
///
/// Accepts exactly `Bearer <token>`: the header is split on the first space
/// into at most two parts, the first must equal the scheme literal and the
/// second must equal the configured token byte-for-byte. Everything else —
/// empty header, missing scheme, lowercase scheme, wrong token, a token
/// with anything appended — rejects.
#[derive(Debug, Clone)]
pub struct Authorizer {
    token: String,
}

impl Authorizer {
    /// Create an authorizer for the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Decide whether the raw `Authorization` header value is acceptable.
    ///
    /// Callers pass the empty string when the header is absent or not valid
    /// UTF-8. The bounded parse cannot index past the split result, so a
    /// header with no space at all is an ordinary reject.
    pub fn authorize(&self, header: &str) -> bool {
        let mut parts = header.splitn(2, ' ');
        match (parts.next(), parts.next()) {
            (Some(scheme), Some(token)) => scheme == BEARER_SCHEME && token == self.token,
            _ => false,
        }
    }
}
