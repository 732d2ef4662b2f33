//! 快照流程错误定义

use thiserror::Error;
use vsnap_vim::VimError;

/// 快照流程错误类型
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// 连接阶段没有拿到会话
    #[error("Unable to connect to host with supplied info.")]
    NoSession,

    /// UUID 找不到对应的虚拟机
    #[error("Unable to locate VirtualMachine.")]
    VmNotFound,

    /// 流程被外部信号中止
    #[error("Interrupted before the snapshot workflow finished.")]
    Interrupted,

    #[error(transparent)]
    Vim(#[from] VimError),

    #[error("写出结果失败: {0}")]
    Io(#[from] std::io::Error),
}

/// 快照流程结果类型
pub type Result<T> = std::result::Result<T, WorkflowError>;
