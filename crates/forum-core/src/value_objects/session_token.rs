//! Session token - opaque bearer credential carried in the session cookie

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use std::fmt;

/// Number of random bytes behind each token (256 bits)
const TOKEN_BYTES: usize = 32;

/// Opaque, unguessable session token
///
/// Tokens are 32 bytes from the OS CSPRNG, encoded as unpadded URL-safe base64 so
/// they can be placed in a cookie value without escaping. `Debug` never prints the
/// token itself.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Wrap a token received from a client
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the encoded token
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the encoded token
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_token_is_cookie_safe() {
        let token = SessionToken::generate();
        // 32 bytes -> 43 base64 chars without padding
        assert_eq!(token.as_str().len(), 43);
        assert!(token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_generated_tokens_are_distinct() {
        let tokens: HashSet<_> = (0..1000).map(|_| SessionToken::generate()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_debug_hides_value() {
        let token = SessionToken::from_raw("super-secret");
        assert_eq!(format!("{token:?}"), "SessionToken(..)");
    }
}
