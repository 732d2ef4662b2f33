//! vsnap CLI 应用

use anyhow::Result;
use clap::{Args, Parser};
use tracing::{debug, Level};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

mod commands;
mod config;

#[derive(Parser, Debug)]
#[command(name = "vsnap")]
#[command(about = "为 vSphere 虚拟机创建快照，等待完成并输出快照树", long_about = None)]
#[command(version)]
pub struct Cli {
    /// 日志级别 (trace/debug/info/warn/error)
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,

    /// 配置文件路径 (默认 ~/.config/vsnap/config.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}

/// 连接参数
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// vSphere 服务地址
    #[arg(short = 's', long)]
    pub host: Option<String>,

    /// 端口
    #[arg(short = 'o', long)]
    pub port: Option<u16>,

    /// 登录用户名
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// 登录密码，未提供时交互输入
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// 跳过证书校验
    #[arg(short = 'S', long)]
    pub disable_ssl_verification: bool,
}

/// 快照参数
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// 虚拟机 UUID，未指定 -i 时按 BIOS UUID 查找
    #[arg(short = 'j', long)]
    pub uuid: String,

    /// 把 UUID 当作 instance UUID
    #[arg(short = 'i', long)]
    pub instance: bool,

    /// 快照描述
    #[arg(short = 'd', long)]
    pub description: Option<String>,

    /// 快照名称
    #[arg(short = 'n', long)]
    pub name: String,

    /// 静默文件系统
    #[arg(short = 'q', long)]
    pub quiesce: bool,

    /// 包含内存
    #[arg(short = 'm', long)]
    pub memory: bool,
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志，RUST_LOG 优先；日志写 stderr，结果写 stdout
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = LevelFilter::from_level(parse_level(&cli.log_level));
        EnvFilter::default().add_directive(level.into())
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("vsnap CLI 启动");

    commands::snapshot::handle(cli.config.as_deref(), cli.connection, cli.snapshot).await
}
