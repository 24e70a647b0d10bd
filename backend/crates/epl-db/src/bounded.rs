use crate::{DbError, Result as DbErrorResult};

use epl_core::ErrorLocation;

use std::future::Future;
use std::panic::Location;
use std::time::Duration;

/// Run a store call under a deadline. Dropping the future cancels the in-flight statement.
#[track_caller]
pub(crate) fn bounded<T, F>(
    timeout: Duration,
    call: F,
) -> impl Future<Output = DbErrorResult<T>>
where
    F: Future<Output = DbErrorResult<T>>,
{
    let location = ErrorLocation::from(Location::caller());
    async move {
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!("Store call timed out after {}ms", timeout.as_millis());
                Err(DbError::Timeout { timeout, location })
            }
        }
    }
}
