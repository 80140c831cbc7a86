use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VideoEmError {
    #[error("API request failed with status {0}")]
    RequestFailed(u16),
    #[error("required element '{0}' is missing")]
    MissingElement(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("invalid video: {0}")]
    InvalidVideo(String),
    #[error("missing required parameters: {0}")]
    MissingParameter(&'static str),
    #[error("invalid cursor url '{0}'")]
    InvalidCursor(String),
}

impl VideoEmError {
    /// 服务端返回了非 2xx 状态码，这类错误可以等下一次触发时重试
    pub fn is_status(&self) -> bool {
        matches!(self, VideoEmError::RequestFailed(_))
    }
}
