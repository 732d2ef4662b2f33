//! 远端能力抽象
//!
//! 快照流程只依赖以下几个操作：连接、按 UUID 查找、创建快照、
//! 读取任务状态、读取快照树、断开连接。

use std::fmt;

use async_trait::async_trait;
use tracing::info;
use vsnap_vim::{
    endpoint, CreateSnapshotRequest, ManagedObjectReference, Result, SnapshotInfo,
    TaskInfoState, VimClient, VimConfig,
};

/// 连接参数
#[derive(Clone)]
pub struct ConnectParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,

    /// 跳过证书校验
    pub disable_ssl_verification: bool,

    /// 超时和 API 版本，其中的 `verify_ssl` 由上面的标志决定
    pub config: VimConfig,
}

impl fmt::Debug for ConnectParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("disable_ssl_verification", &self.disable_ssl_verification)
            .field("config", &self.config)
            .finish()
    }
}

/// 建立会话
#[async_trait]
pub trait Connector: Send + Sync {
    type Session: SnapshotSession;

    /// 连接并登录
    ///
    /// 传输层失败应返回 `is_io() == true` 的错误。
    async fn connect(&self, params: &ConnectParams) -> Result<Self::Session>;
}

/// 已认证会话上的快照相关操作
#[async_trait]
pub trait SnapshotSession: Send + Sync {
    /// 按 UUID 查找虚拟机
    async fn find_vm(
        &self,
        uuid: &str,
        instance_uuid: bool,
    ) -> Result<Option<ManagedObjectReference>>;

    /// 提交创建快照任务
    async fn create_snapshot(
        &self,
        vm: &ManagedObjectReference,
        req: &CreateSnapshotRequest,
    ) -> Result<ManagedObjectReference>;

    /// 读取任务当前状态
    async fn task_state(&self, task: &ManagedObjectReference) -> Result<TaskInfoState>;

    /// 读取虚拟机快照信息
    async fn snapshot_info(&self, vm: &ManagedObjectReference) -> Result<Option<SnapshotInfo>>;

    /// 释放会话
    async fn disconnect(&self) -> Result<()>;
}

/// 基于 VI/JSON 客户端的连接器
#[derive(Debug, Clone, Copy, Default)]
pub struct VimConnector;

#[async_trait]
impl Connector for VimConnector {
    type Session = VimClient;

    async fn connect(&self, params: &ConnectParams) -> Result<VimClient> {
        let config = VimConfig {
            verify_ssl: !params.disable_ssl_verification,
            ..params.config.clone()
        };

        if config.verify_ssl {
            info!("连接 {}:{}", params.host, params.port);
        } else {
            info!("连接 {}:{} (跳过证书校验)", params.host, params.port);
        }

        let client = VimClient::new(&endpoint(&params.host, params.port)?, config)?;
        client.login(&params.user, &params.password).await?;
        Ok(client)
    }
}

#[async_trait]
impl SnapshotSession for VimClient {
    async fn find_vm(
        &self,
        uuid: &str,
        instance_uuid: bool,
    ) -> Result<Option<ManagedObjectReference>> {
        self.search_index().find_by_uuid(uuid, instance_uuid).await
    }

    async fn create_snapshot(
        &self,
        vm: &ManagedObjectReference,
        req: &CreateSnapshotRequest,
    ) -> Result<ManagedObjectReference> {
        self.virtual_machine().create_snapshot(vm, req).await
    }

    async fn task_state(&self, task: &ManagedObjectReference) -> Result<TaskInfoState> {
        self.task().state(task).await
    }

    async fn snapshot_info(&self, vm: &ManagedObjectReference) -> Result<Option<SnapshotInfo>> {
        self.virtual_machine().snapshot(vm).await
    }

    async fn disconnect(&self) -> Result<()> {
        self.logout().await
    }
}
