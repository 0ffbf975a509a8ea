//! AccessTokenSource port - where outbound requests get their bearer token.

use secrecy::SecretString;

/// Supplies the current access token, if a session exists.
pub trait AccessTokenSource: Send + Sync {
    /// The token to send, or `None` to send the request unauthenticated.
    fn access_token(&self) -> Option<SecretString>;
}

/// Never has a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAccessToken;

impl AccessTokenSource for NoAccessToken {
    fn access_token(&self) -> Option<SecretString> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_access_token_yields_nothing() {
        assert!(NoAccessToken.access_token().is_none());
    }
}
