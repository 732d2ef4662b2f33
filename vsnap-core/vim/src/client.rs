//! VI/JSON 客户端核心实现

use std::sync::Arc;
use tokio::sync::RwLock;
use reqwest::{Client, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{VimError, Result};
use crate::api::{SearchIndexApi, TaskApi, VirtualMachineApi};
use crate::models::{FaultBody, LoginRequest, ManagedObjectReference, ServiceContent, UserSession};

/// 会话令牌所在的请求/响应头
pub const SESSION_HEADER: &str = "vmware-api-session-id";

/// 客户端配置
#[derive(Debug, Clone)]
pub struct VimConfig {
    /// 连接超时（秒）
    pub connect_timeout: u64,

    /// 请求超时（秒）
    pub request_timeout: u64,

    /// 是否验证 SSL 证书
    pub verify_ssl: bool,

    /// VI/JSON API 版本，例如 `8.0.1.0`
    pub api_release: String,
}

impl Default for VimConfig {
    fn default() -> Self {
        Self {
            connect_timeout: 10,
            request_timeout: 30,
            verify_ssl: true,
            api_release: "8.0.1.0".to_string(),
        }
    }
}

/// 由主机和端口构造 HTTPS 入口地址
pub fn endpoint(host: &str, port: u16) -> Result<String> {
    let host = host.trim();
    if host.is_empty() {
        return Err(VimError::ConfigError("主机地址为空".to_string()));
    }

    let url = Url::parse(&format!("https://{}:{}", host, port))
        .map_err(|e| VimError::ConfigError(format!("无效的主机地址 {}: {}", host, e)))?;
    if url.host_str().is_none() || url.path() != "/" {
        return Err(VimError::ConfigError(format!("无效的主机地址: {}", host)));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// vSphere VI/JSON 客户端
pub struct VimClient {
    /// API 基础 URL (`{endpoint}/sdk/vim25/{release}`)
    base_url: String,

    /// HTTP 客户端
    http_client: Client,

    /// 会话令牌
    session_key: Arc<RwLock<Option<String>>>,

    /// 登录时读取的 ServiceInstance 内容
    service_content: Arc<RwLock<Option<ServiceContent>>>,
}

impl VimClient {
    /// 创建新的客户端
    ///
    /// `verify_ssl == false` 时接受无效证书。
    pub fn new(endpoint: &str, config: VimConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout))
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout))
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| VimError::HttpError(e.to_string()))?;

        Ok(Self {
            base_url: format!(
                "{}/sdk/vim25/{}",
                endpoint.trim_end_matches('/'),
                config.api_release
            ),
            http_client,
            session_key: Arc::new(RwLock::new(None)),
            service_content: Arc::new(RwLock::new(None)),
        })
    }

    /// 读取 ServiceInstance 内容（无需认证）
    pub async fn retrieve_service_content(&self) -> Result<ServiceContent> {
        let url = format!("{}/ServiceInstance/ServiceInstance/content", self.base_url);
        debug!("VI/JSON 请求: GET {}", url);

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(error_from_response(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| VimError::ParseError(e.to_string()))
    }

    /// 认证登录
    pub async fn login(&self, user: &str, password: &str) -> Result<UserSession> {
        info!("vSphere 登录: {}", user);

        let content = self.retrieve_service_content().await?;
        if let Some(name) = &content.about.full_name {
            debug!("服务端: {}", name);
        }

        let url = format!(
            "{}/SessionManager/{}/Login",
            self.base_url, content.session_manager.value
        );
        let body = LoginRequest {
            user_name: user.to_string(),
            password: password.to_string(),
        };

        let response = self.http_client.post(&url).json(&body).send().await?;
        let status = response.status();
        let key = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().await?;

        if !status.is_success() {
            warn!("登录失败: {} - {}", status, text);
            return Err(error_from_response(status, &text));
        }

        let key = key.ok_or_else(|| {
            VimError::AuthError(format!("响应缺少 {} 头", SESSION_HEADER))
        })?;
        let session: UserSession = serde_json::from_str(&text)
            .map_err(|e| VimError::ParseError(e.to_string()))?;

        *self.session_key.write().await = Some(key);
        *self.service_content.write().await = Some(content);

        info!("vSphere 登录成功");
        Ok(session)
    }

    /// 注销登出，未登录时直接返回
    pub async fn logout(&self) -> Result<()> {
        if !self.is_logged_in().await {
            return Ok(());
        }

        info!("vSphere 登出");
        let session_manager = self.service_content().await?.session_manager;
        let result: Result<()> = self
            .request(
                Method::POST,
                &format!("/SessionManager/{}/Logout", session_manager.value),
                None::<()>,
            )
            .await;

        *self.session_key.write().await = None;
        result
    }

    pub async fn is_logged_in(&self) -> bool {
        self.session_key.read().await.is_some()
    }

    /// 当前会话令牌
    pub async fn session_key(&self) -> Result<String> {
        self.session_key.read().await.clone().ok_or(VimError::NotConnected)
    }

    /// 登录时缓存的 ServiceInstance 内容
    pub async fn service_content(&self) -> Result<ServiceContent> {
        self.service_content.read().await.clone().ok_or(VimError::NotConnected)
    }

    pub(crate) async fn search_index_ref(&self) -> Result<ManagedObjectReference> {
        Ok(self.service_content().await?.search_index)
    }

    /// 获取 SearchIndex API
    pub fn search_index(&self) -> SearchIndexApi<'_> {
        SearchIndexApi::new(self)
    }

    /// 获取虚拟机 API
    pub fn virtual_machine(&self) -> VirtualMachineApi<'_> {
        VirtualMachineApi::new(self)
    }

    /// 获取任务 API
    pub fn task(&self) -> TaskApi<'_> {
        TaskApi::new(self)
    }

    /// 发送带会话令牌的请求
    ///
    /// 空响应体和 `null` 都按 JSON `null` 解析，因此 `R` 可以是 `()` 或 `Option<_>`。
    pub(crate) async fn request<T: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<T>,
    ) -> Result<R> {
        let url = format!("{}{}", self.base_url, path);
        debug!("VI/JSON 请求: {} {}", method, url);

        let key = self.session_key().await?;

        let mut request = self.http_client
            .request(method, &url)
            .header(SESSION_HEADER, key);

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("API 请求失败: {} - {}", status, text);
            return Err(error_from_response(status, &text));
        }

        let value = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| VimError::ParseError(e.to_string()))?
        };

        serde_json::from_value(value).map_err(|e| VimError::ParseError(e.to_string()))
    }
}

/// 把失败响应转换为错误，能识别为 vim fault 时优先使用
fn error_from_response(status: StatusCode, text: &str) -> VimError {
    match serde_json::from_str::<FaultBody>(text) {
        Ok(fault) => VimError::Fault {
            message: fault.message(),
            type_name: fault.type_name,
        },
        Err(_) => VimError::ApiError(status.as_u16(), text.to_string()),
    }
}
