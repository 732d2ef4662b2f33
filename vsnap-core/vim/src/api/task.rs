//! 任务 API

use reqwest::Method;
use tracing::debug;

use crate::client::VimClient;
use crate::error::Result;
use crate::models::{ManagedObjectReference, TaskInfo, TaskInfoState};

/// 任务 API
pub struct TaskApi<'a> {
    client: &'a VimClient,
}

impl<'a> TaskApi<'a> {
    pub(crate) fn new(client: &'a VimClient) -> Self {
        Self { client }
    }

    /// 读取任务信息
    pub async fn info(&self, task: &ManagedObjectReference) -> Result<TaskInfo> {
        debug!("读取任务信息: {}", task.value);
        self.client.request(
            Method::GET,
            &format!("/Task/{}/info", task.value),
            None::<()>,
        ).await
    }

    /// 读取任务状态
    pub async fn state(&self, task: &ManagedObjectReference) -> Result<TaskInfoState> {
        Ok(self.info(task).await?.state)
    }
}
