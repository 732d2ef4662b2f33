//! 虚拟机 API
//!
//! 提供虚拟机快照相关功能，包括：
//! - 创建快照 (异步任务)
//! - 读取快照树

use reqwest::Method;
use tracing::info;

use crate::client::VimClient;
use crate::error::Result;
use crate::models::{CreateSnapshotRequest, ManagedObjectReference, SnapshotInfo};

/// 虚拟机 API
pub struct VirtualMachineApi<'a> {
    client: &'a VimClient,
}

impl<'a> VirtualMachineApi<'a> {
    pub(crate) fn new(client: &'a VimClient) -> Self {
        Self { client }
    }

    /// 创建快照，返回任务引用
    pub async fn create_snapshot(
        &self,
        vm: &ManagedObjectReference,
        req: &CreateSnapshotRequest,
    ) -> Result<ManagedObjectReference> {
        info!(
            "创建虚拟机快照: {} -> {} (memory={}, quiesce={})",
            vm.value, req.name, req.memory, req.quiesce
        );
        self.client.request(
            Method::POST,
            &format!("/VirtualMachine/{}/CreateSnapshot_Task", vm.value),
            Some(req),
        ).await
    }

    /// 读取快照信息，虚拟机没有快照时返回 `None`
    pub async fn snapshot(&self, vm: &ManagedObjectReference) -> Result<Option<SnapshotInfo>> {
        info!("读取虚拟机快照树: {}", vm.value);
        self.client.request(
            Method::GET,
            &format!("/VirtualMachine/{}/snapshot", vm.value),
            None::<()>,
        ).await
    }
}
