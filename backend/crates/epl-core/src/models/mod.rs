pub mod auth_subject;
pub mod identity;
pub mod new_identity;
pub mod password_hash;
pub mod permissions;
pub mod token;
pub mod token_hash;
pub mod token_scope;
