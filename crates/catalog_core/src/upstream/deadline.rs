use std::future::Future;

use tokio::time::{Instant, timeout_at};

use crate::error::{CatalogError, FetchStage};

/// Run an upstream call, failing with `DeadlineExceeded` once `deadline` passes.
pub async fn within_deadline<F, T>(
    deadline: Option<Instant>,
    stage: FetchStage,
    call: F,
) -> Result<T, CatalogError>
where
    F: Future<Output = T>,
{
    match deadline {
        None => Ok(call.await),
        Some(at) => timeout_at(at, call)
            .await
            .map_err(|_| CatalogError::DeadlineExceeded { stage }),
    }
}
