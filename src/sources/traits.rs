use async_trait::async_trait;

use crate::domain::Announcement;
use crate::errors::NewsResult;

/// Remote news backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch the full current list of announcements
    async fn fetch_news(&self) -> NewsResult<Vec<Announcement>>;

    /// Ask the backend to regenerate its data. Completes when the command is
    /// acknowledged, not when regeneration has finished.
    async fn trigger_refresh(&self) -> NewsResult<()>;
}
