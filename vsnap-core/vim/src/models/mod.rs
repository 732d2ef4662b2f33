//! VI/JSON 数据模型
//!
//! 只建模快照流程用到的字段，其余字段在反序列化时忽略。
//! 字段名与 vSphere Web Services API 保持一致 (camelCase)。

use serde::{Deserialize, Serialize};

pub mod snapshot;
pub mod task;

pub use snapshot::{CreateSnapshotRequest, SnapshotInfo, SnapshotTree};
pub use task::{TaskInfo, TaskInfoState};

/// 托管对象引用
///
/// 远端对象 (虚拟机、任务、SearchIndex 等) 的不透明句柄。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedObjectReference {
    #[serde(rename = "_typeName", default = "default_moref_type_name")]
    pub type_name: String,

    /// 对象类型，例如 `VirtualMachine`、`Task`
    #[serde(rename = "type")]
    pub kind: String,

    /// 对象 ID，例如 `vm-42`、`task-1001`
    pub value: String,
}

fn default_moref_type_name() -> String {
    "ManagedObjectReference".to_string()
}

impl ManagedObjectReference {
    pub fn new(kind: &str, value: &str) -> Self {
        Self {
            type_name: default_moref_type_name(),
            kind: kind.to_string(),
            value: value.to_string(),
        }
    }
}

impl std::fmt::Display for ManagedObjectReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

/// 服务端版本信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutInfo {
    pub full_name: Option<String>,
    pub api_version: Option<String>,
    pub instance_uuid: Option<String>,
}

/// ServiceInstance 内容
///
/// 未登录即可读取，登录前用它定位 SessionManager。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceContent {
    #[serde(default)]
    pub about: AboutInfo,

    pub search_index: ManagedObjectReference,

    pub session_manager: ManagedObjectReference,
}

/// 登录请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

/// 登录会话
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub key: String,
    pub user_name: String,
    pub full_name: Option<String>,
}

/// FindByUuid 请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindByUuidRequest {
    pub uuid: String,

    /// 只搜索虚拟机
    pub vm_search: bool,

    /// true: 按 instance UUID 查找; false: 按 BIOS UUID 查找
    pub instance_uuid: bool,
}

/// 服务端返回的故障体
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FaultBody {
    #[serde(rename = "_typeName")]
    pub type_name: String,

    #[serde(default)]
    pub fault_message: Vec<LocalizableMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LocalizableMessage {
    #[serde(default)]
    pub key: String,

    pub message: Option<String>,
}

impl FaultBody {
    pub(crate) fn message(&self) -> String {
        let parts: Vec<&str> = self
            .fault_message
            .iter()
            .map(|m| m.message.as_deref().unwrap_or(m.key.as_str()))
            .filter(|m| !m.is_empty())
            .collect();
        if parts.is_empty() {
            self.type_name.clone()
        } else {
            parts.join("; ")
        }
    }
}
