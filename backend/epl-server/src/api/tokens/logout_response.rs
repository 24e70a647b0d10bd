use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Number of authentication tokens revoked
    pub revoked: u64,
}
