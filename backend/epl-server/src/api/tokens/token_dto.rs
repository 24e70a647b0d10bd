use epl_core::Token;

use serde::Serialize;

/// The only place a token plaintext is ever serialized.
#[derive(Debug, Serialize)]
pub struct TokenDto {
    pub token: String,
    pub expiry: String,
}

impl From<Token> for TokenDto {
    fn from(token: Token) -> Self {
        Self {
            expiry: token.expiry.to_rfc3339(),
            token: token.plaintext,
        }
    }
}
