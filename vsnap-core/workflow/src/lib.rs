//! vsnap 快照流程
//!
//! 按固定顺序执行一次快照操作：
//!
//! 1. 连接 vSphere 并登录
//! 2. 按 UUID 查找虚拟机
//! 3. 规范化 quiesce / memory 标志
//! 4. 提交 `CreateSnapshot_Task`
//! 5. 轮询任务状态（最多 180 秒）
//! 6. 重新查找虚拟机并输出快照树
//!
//! 远端能力通过 [`Connector`] / [`SnapshotSession`] 两个 trait 抽象，
//! 生产环境使用 [`VimConnector`]，测试中可以替换为内存实现。

pub mod backend;
pub mod error;
pub mod options;
pub mod poll;
pub mod report;
pub mod runner;

pub use backend::{ConnectParams, Connector, SnapshotSession, VimConnector};
pub use error::{WorkflowError, Result};
pub use options::{SnapshotFlags, SnapshotJob};
pub use poll::{poll_task, PollOutcome, POLL_INTERVAL, SNAPSHOT_LIMIT_SECONDS};
pub use report::{leftmost_path, write_snapshot_tree, write_status, NO_SNAPSHOTS_MESSAGE};
pub use runner::{run, run_until, WorkflowReport, FAST_SNAPSHOT_SECONDS, SETTLE_DELAY};
