use anyhow::{Context, Result, ensure};
use parking_lot::Once;
use reqwest::{Method, Url, header};

use crate::error::VideoEmError;

/// 一个对 reqwest::Client 的简单封装，所有请求都基于同一个站点地址
#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
    base: Url,
    csrf_token: String,
}

impl Client {
    pub fn new(base_url: &str, csrf_token: impl Into<String>) -> Result<Self> {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            // 另一个调用方先安装了 provider 时这里会返回 Err，忽略即可
            let _ = rustls::crypto::ring::default_provider().install_default();
        });
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("videoem/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        let inner = reqwest::Client::builder()
            .default_headers(headers)
            .gzip(true)
            .connect_timeout(std::time::Duration::from_secs(10))
            .read_timeout(std::time::Duration::from_secs(30))
            .build()
            .context("failed to build reqwest client")?;
        Ok(Self {
            inner,
            base: Url::parse(base_url).with_context(|| format!("invalid base url '{base_url}'"))?,
            csrf_token: csrf_token.into(),
        })
    }

    /// 将站内路径或服务端返回的完整游标地址解析为绝对地址
    pub fn resolve(&self, path: &str) -> Result<Url> {
        Ok(self
            .base
            .join(path)
            .map_err(|_| VideoEmError::InvalidCursor(path.to_owned()))?)
    }

    pub fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder> {
        Ok(self.inner.request(method, self.resolve(path)?))
    }

    /// 修改类请求，必须携带页面中的 CSRF token
    pub fn mutate(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder> {
        ensure!(!self.csrf_token.is_empty(), VideoEmError::MissingParameter("csrf token"));
        Ok(self.request(method, path)?.header("X-CSRFToken", &self.csrf_token))
    }
}

pub(crate) trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output>;
}

impl Validate for reqwest::Response {
    type Output = reqwest::Response;

    fn validate(self) -> Result<Self::Output> {
        let status = self.status();
        ensure!(status.is_success(), VideoEmError::RequestFailed(status.as_u16()));
        Ok(self)
    }
}
