//! CLI 配置管理
//!
//! **数据存储方式**: TOML 文件 (~/.config/vsnap/config.toml)
//!
//! 优先级: 命令行参数 > 环境变量 (`VSNAP_*`) > 配置文件 > 默认值

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use vsnap_vim::VimConfig;
use vsnap_workflow::ConnectParams;

use crate::ConnectionArgs;

/// CLI 配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// 连接配置
    #[serde(default)]
    pub connection: ConnectionConfig,
}

/// 连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// vSphere 服务地址
    pub host: Option<String>,

    /// 登录用户名
    pub user: Option<String>,

    /// 登录密码 (不建议写入文件)
    pub password: Option<String>,

    /// 端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 跳过证书校验
    #[serde(default)]
    pub disable_ssl_verification: bool,

    /// VI/JSON API 版本
    #[serde(default = "default_api_release")]
    pub api_release: String,

    /// 连接超时（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// 请求超时（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

fn default_port() -> u16 {
    443
}

fn default_api_release() -> String {
    VimConfig::default().api_release
}

fn default_connect_timeout() -> u64 {
    VimConfig::default().connect_timeout
}

fn default_request_timeout() -> u64 {
    VimConfig::default().request_timeout
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: None,
            user: None,
            password: None,
            port: default_port(),
            disable_ssl_verification: false,
            api_release: default_api_release(),
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => anyhow::bail!("Invalid {} value: {}", name, value),
    }
}

impl CliConfig {
    /// 默认配置文件路径
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("无法获取用户主目录")?;
        Ok(home.join(".config").join("vsnap").join("config.toml"))
    }

    /// 加载配置
    ///
    /// 显式指定的文件必须存在；默认位置的文件不存在时使用默认值。
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => {
                let expanded = shellexpand::tilde(p);
                Self::load_from_path(Path::new(expanded.as_ref()))
            }
            None => {
                let path = Self::config_path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                Self::load_from_path(&path)
            }
        }
    }

    /// 从指定文件加载配置
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {:?}", path))
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let conn = &mut self.connection;

        if let Some(host) = lookup("VSNAP_HOST") {
            conn.host = Some(host);
        }
        if let Some(user) = lookup("VSNAP_USER") {
            conn.user = Some(user);
        }
        if let Some(password) = lookup("VSNAP_PASSWORD") {
            conn.password = Some(password);
        }
        if let Some(port) = lookup("VSNAP_PORT") {
            conn.port = port.parse().context("Invalid VSNAP_PORT value")?;
        }
        if let Some(flag) = lookup("VSNAP_DISABLE_SSL_VERIFICATION") {
            conn.disable_ssl_verification = parse_bool("VSNAP_DISABLE_SSL_VERIFICATION", &flag)?;
        }
        if let Some(release) = lookup("VSNAP_API_RELEASE") {
            conn.api_release = release;
        }

        Ok(())
    }
}

impl ConnectionConfig {
    /// 与命令行参数合并，得到最终连接参数
    ///
    /// 各来源都没有密码时调用 `prompt(host, user)` 交互获取。
    pub fn resolve<F>(&self, args: &ConnectionArgs, prompt: F) -> Result<ConnectParams>
    where
        F: FnOnce(&str, &str) -> Result<String>,
    {
        let host = args
            .host
            .clone()
            .or_else(|| self.host.clone())
            .context("未指定 vSphere 主机 (--host / VSNAP_HOST / 配置文件)")?;
        let user = args
            .user
            .clone()
            .or_else(|| self.user.clone())
            .context("未指定用户名 (--user / VSNAP_USER / 配置文件)")?;

        let password = match args.password.clone().or_else(|| self.password.clone()) {
            Some(password) => password,
            None => prompt(&host, &user)?,
        };

        Ok(ConnectParams {
            port: args.port.unwrap_or(self.port),
            disable_ssl_verification: args.disable_ssl_verification
                || self.disable_ssl_verification,
            config: VimConfig {
                connect_timeout: self.connect_timeout,
                request_timeout: self.request_timeout,
                verify_ssl: true,
                api_release: self.api_release.clone(),
            },
            host,
            user,
            password,
        })
    }
}
