//! vSphere VI/JSON 客户端
//!
//! 通过 `/sdk/vim25/{release}` JSON 接口与 vCenter / ESXi 交互，
//! 只覆盖快照流程需要的几个托管对象方法。
//!
//! # 功能
//!
//! - **会话管理** (`VimClient`): 登录、登出、会话令牌
//! - **查找** (`SearchIndexApi`): 按 BIOS / instance UUID 查找虚拟机
//! - **快照** (`VirtualMachineApi`): 创建快照任务、读取快照树
//! - **任务** (`TaskApi`): 读取任务状态
//!
//! # 示例
//!
//! ```ignore
//! use vsnap_vim::{endpoint, VimClient, VimConfig, CreateSnapshotRequest};
//!
//! let client = VimClient::new(&endpoint("vcenter.local", 443)?, VimConfig::default())?;
//! client.login("administrator@vsphere.local", "password").await?;
//!
//! let vm = client.search_index().find_by_uuid("4229...", false).await?;
//! if let Some(vm) = vm {
//!     let req = CreateSnapshotRequest {
//!         name: "before-upgrade".into(),
//!         description: None,
//!         memory: false,
//!         quiesce: true,
//!     };
//!     let task = client.virtual_machine().create_snapshot(&vm, &req).await?;
//!     println!("{}", client.task().state(&task).await?);
//! }
//!
//! client.logout().await?;
//! ```

pub mod client;
pub mod api;
pub mod models;
pub mod error;

pub use client::{endpoint, VimClient, VimConfig, SESSION_HEADER};
pub use error::{VimError, Result};

// 导出 API 模块
pub use api::{
    search_index::SearchIndexApi,
    task::TaskApi,
    virtual_machine::VirtualMachineApi,
};

// 导出数据模型
pub use models::{
    AboutInfo, ManagedObjectReference, ServiceContent, UserSession,
    LoginRequest, FindByUuidRequest,
    CreateSnapshotRequest, SnapshotInfo, SnapshotTree,
    TaskInfo, TaskInfoState,
};
