//! Resolves the `Authorization` header to the caller's [`AuthSubject`].

use crate::{ApiError, AppState};

use epl_core::{AuthSubject, Identity};

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};
use http::header::AUTHORIZATION;

/// No header yields `AuthSubject::Anonymous`; a present but bad header is
/// rejected with 401.
pub struct CurrentSubject(pub AuthSubject);

impl CurrentSubject {
    /// The identity behind this request, after the activation policy check.
    pub fn require_activated(&self, state: &AppState) -> Result<Identity, ApiError> {
        Ok(state.auth.require_activated(&self.0)?.clone())
    }
}

impl FromRequestParts<AppState> for CurrentSubject {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = match parts.headers.get(AUTHORIZATION) {
                None => None,
                Some(value) => Some(value.to_str().map_err(|_| {
                    ApiError::unauthorized("invalid or missing authentication token")
                })?),
            };

            let subject = state.auth.authenticate(header).await?;

            if let Some(identity) = subject.identity() {
                log::debug!("Request authenticated as user {}", identity.id);
            }

            Ok(CurrentSubject(subject))
        }
    }
}
