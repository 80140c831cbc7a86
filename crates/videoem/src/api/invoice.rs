use anyhow::Result;
use reqwest::Method;
use videoem_model::InvoiceLink;

use crate::api::{Client, Validate};

impl Client {
    /// 获取打赏视频的支付链接，链接本身交给宿主 WebApp 打开
    pub async fn invoice_link(&self, user: i64, video_id: &str) -> Result<String> {
        Ok(self
            .request(Method::GET, "/api/v1/invoice_link")?
            .query(&[("user", user.to_string().as_str()), ("video", video_id)])
            .send()
            .await?
            .validate()?
            .json::<InvoiceLink>()
            .await?
            .invoice_link)
    }
}
