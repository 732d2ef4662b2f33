//! VI/JSON 客户端错误定义

use thiserror::Error;

/// VI/JSON 客户端错误类型
#[derive(Error, Debug)]
pub enum VimError {
    /// 传输层失败 (连接被拒、TLS 握手失败、超时等)
    #[error("HTTP 错误: {0}")]
    HttpError(String),

    #[error("认证错误: {0}")]
    AuthError(String),

    #[error("API 错误 [{0}]: {1}")]
    ApiError(u16, String),

    /// 服务端返回的 vim fault，例如 `InvalidLogin`、`ManagedObjectNotFound`
    #[error("vSphere 故障 {type_name}: {message}")]
    Fault { type_name: String, message: String },

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("未连接，请先登录")]
    NotConnected,
}

impl VimError {
    /// 是否为 I/O 层面的失败
    pub fn is_io(&self) -> bool {
        matches!(self, VimError::HttpError(_))
    }
}

impl From<reqwest::Error> for VimError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            VimError::ParseError(e.to_string())
        } else {
            VimError::HttpError(e.to_string())
        }
    }
}

/// VI/JSON 客户端结果类型
pub type Result<T> = std::result::Result<T, VimError>;
