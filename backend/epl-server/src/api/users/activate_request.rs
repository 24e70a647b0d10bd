use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ActivateRequest {
    /// Activation token plaintext
    pub token: String,
}
