//! 创建快照命令

use anyhow::{Context, Result};
use dialoguer::Password;
use std::future;
use std::io;
use tracing::{info, warn};
use vsnap_workflow::{run_until, SnapshotJob, VimConnector};

use crate::config::CliConfig;
use crate::{ConnectionArgs, SnapshotArgs};

/// 等待 Ctrl-C；无法监听信号时永不完成
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("无法监听退出信号: {}", e);
        future::pending::<()>().await;
    }
}

/// 交互输入密码
fn prompt_password(host: &str, user: &str) -> Result<String> {
    Password::new()
        .with_prompt(format!("Enter password for host {} and user {}", host, user))
        .interact()
        .context("读取密码失败")
}

pub async fn handle(
    config_path: Option<&str>,
    connection: ConnectionArgs,
    snapshot: SnapshotArgs,
) -> Result<()> {
    let mut config = CliConfig::load(config_path)?;
    config.apply_env_overrides()?;

    let params = config.connection.resolve(&connection, prompt_password)?;

    let job = SnapshotJob {
        uuid: snapshot.uuid,
        instance_uuid: snapshot.instance,
        name: snapshot.name,
        description: snapshot.description,
        quiesce: snapshot.quiesce,
        memory: snapshot.memory,
    };

    let mut out = io::stdout();
    let report = run_until(&VimConnector, &params, &job, &mut out, ctrl_c()).await?;

    info!(
        "快照流程结束: 状态 {}，等待 {} 秒",
        report.final_state, report.elapsed
    );
    Ok(())
}
