//! 任务轮询

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;
use vsnap_vim::{ManagedObjectReference, Result, TaskInfoState};

use crate::backend::SnapshotSession;

/// 最长等待轮数，每轮一秒
pub const SNAPSHOT_LIMIT_SECONDS: u32 = 180;

/// 轮询间隔
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// 轮询结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    /// 最后一次读到的状态
    pub state: TaskInfoState,

    /// 已等待的轮数
    pub elapsed: u32,
}

/// 轮询任务直到终态或达到等待上限
///
/// 达到上限不算错误，返回最后读到的状态；任务本身不会被取消。
pub async fn poll_task<S>(session: &S, task: &ManagedObjectReference) -> Result<PollOutcome>
where
    S: SnapshotSession + ?Sized,
{
    let mut elapsed = 0;
    let mut state = session.task_state(task).await?;

    while !state.is_terminal() && elapsed < SNAPSHOT_LIMIT_SECONDS {
        sleep(POLL_INTERVAL).await;
        elapsed += 1;
        state = session.task_state(task).await?;
        debug!("任务 {} 状态: {} ({}s)", task.value, state, elapsed);
    }

    Ok(PollOutcome { state, elapsed })
}
