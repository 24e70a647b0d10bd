pub mod error;
pub mod extractors;
pub mod permissions;
pub mod tokens;
pub mod users;
