use serde::{Deserialize, Serialize};

/// user_get 接口返回的用户信息
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: i64,
    pub telegram_id: i64,
    pub telegram_fullname: String,
    #[serde(default)]
    pub stars_count: u64,
    /// 保留服务端的原始时间字符串，交给展示层格式化
    pub time_create: String,
    #[serde(default)]
    pub video_count: u64,
    #[serde(default)]
    pub subscriptions: Vec<i64>,
}

/// 宿主 WebApp 注入的用户信息，各字段都不保证存在
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAppUser {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceLink {
    pub invoice_link: String,
}
