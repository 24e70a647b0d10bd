use crate::TokenDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub authentication_token: TokenDto,
}
