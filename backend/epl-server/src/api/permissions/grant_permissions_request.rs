use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GrantPermissionsRequest {
    /// Unknown codes are ignored
    pub codes: Vec<String>,
}
