//! 任务模型

use serde::{Deserialize, Serialize};
use std::fmt;

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskInfoState {
    /// 排队中
    Queued,
    /// 执行中
    Running,
    /// 成功
    Success,
    /// 失败
    Error,
    /// 无法识别的状态
    #[serde(other)]
    Unknown,
}

impl TaskInfoState {
    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskInfoState::Success | TaskInfoState::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskInfoState::Queued => "queued",
            TaskInfoState::Running => "running",
            TaskInfoState::Success => "success",
            TaskInfoState::Error => "error",
            TaskInfoState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TaskInfoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 任务信息
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    #[serde(default)]
    pub key: String,

    pub state: TaskInfoState,

    pub description_id: Option<String>,

    pub entity_name: Option<String>,

    /// 失败时的故障详情，原样保留
    pub error: Option<serde_json::Value>,
}
