use async_trait::async_trait;

use crate::error::TaskClientError;
use crate::task::Task;

#[async_trait]
pub trait TaskSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_tasks(&self) -> Result<Vec<Task>, TaskClientError>;
}
