//! 快照流程执行器

use std::future::{self, Future};
use std::io::Write;
use std::panic::{resume_unwind, AssertUnwindSafe};
use std::time::Duration;

use futures::FutureExt;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use vsnap_vim::{SnapshotInfo, TaskInfoState};

use crate::backend::{ConnectParams, Connector, SnapshotSession};
use crate::error::{Result, WorkflowError};
use crate::options::SnapshotJob;
use crate::poll::poll_task;
use crate::report;

/// 轮询少于该秒数视为"快速完成"
pub const FAST_SNAPSHOT_SECONDS: u32 = 10;

/// 快速完成时读取快照树前的额外等待，让服务端的快照树跟上
pub const SETTLE_DELAY: Duration = Duration::from_secs(3);

/// 流程执行结果
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub final_state: TaskInfoState,
    pub elapsed: u32,
    pub snapshot_info: Option<SnapshotInfo>,
}

/// 执行一次完整的快照流程，输出写入 `out`
///
/// 会话建立后，无论正常结束、出错还是 panic，都会调用一次 `disconnect`。
pub async fn run<C, W>(
    connector: &C,
    params: &ConnectParams,
    job: &SnapshotJob,
    out: &mut W,
) -> Result<WorkflowReport>
where
    C: Connector,
    W: Write + ?Sized,
{
    run_until(connector, params, job, out, future::pending()).await
}

/// 同 [`run`]，`shutdown` 完成时中止流程
///
/// 中止时先断开会话再返回 [`WorkflowError::Interrupted`]，已提交的快照任务不会被取消。
pub async fn run_until<C, W, F>(
    connector: &C,
    params: &ConnectParams,
    job: &SnapshotJob,
    out: &mut W,
    shutdown: F,
) -> Result<WorkflowReport>
where
    C: Connector,
    W: Write + ?Sized,
    F: Future<Output = ()>,
{
    // 传输层失败按"没有会话"处理
    let session = match connector.connect(params).await {
        Ok(session) => Some(session),
        Err(e) if e.is_io() => {
            debug!("连接失败: {}", e);
            None
        }
        Err(e) => return Err(e.into()),
    };
    let Some(session) = session else {
        return Err(WorkflowError::NoSession);
    };

    let workflow = AssertUnwindSafe(run_with_session(&session, job, out)).catch_unwind();
    let outcome = tokio::select! {
        outcome = workflow => Some(outcome),
        _ = shutdown => {
            warn!("收到退出信号，中止快照流程");
            None
        }
    };

    if let Err(e) = session.disconnect().await {
        warn!("断开会话失败: {}", e);
    }

    match outcome {
        Some(Ok(result)) => result,
        Some(Err(panic)) => resume_unwind(panic),
        None => Err(WorkflowError::Interrupted),
    }
}

async fn run_with_session<S, W>(
    session: &S,
    job: &SnapshotJob,
    out: &mut W,
) -> Result<WorkflowReport>
where
    S: SnapshotSession,
    W: Write + ?Sized,
{
    let vm = session
        .find_vm(&job.uuid, job.instance_uuid)
        .await?
        .ok_or(WorkflowError::VmNotFound)?;
    info!("找到虚拟机: {}", vm);

    let request = job.request();
    let task = session.create_snapshot(&vm, &request).await?;
    info!("快照任务已提交: {}", task);

    let outcome = poll_task(session, &task).await?;
    report::write_status(out, &outcome)?;

    // 重新查找，拿到包含新快照的视图
    drop(vm);
    let vm = session
        .find_vm(&job.uuid, job.instance_uuid)
        .await?
        .ok_or(WorkflowError::VmNotFound)?;

    if outcome.elapsed < FAST_SNAPSHOT_SECONDS {
        sleep(SETTLE_DELAY).await;
    }

    let snapshot_info = session.snapshot_info(&vm).await?;
    report::write_snapshot_tree(out, snapshot_info.as_ref())?;

    Ok(WorkflowReport {
        final_state: outcome.state,
        elapsed: outcome.elapsed,
        snapshot_info,
    })
}
