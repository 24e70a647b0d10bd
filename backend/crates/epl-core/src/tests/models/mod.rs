mod auth_subject;
mod permissions;
mod token_hash;
mod token_scope;
