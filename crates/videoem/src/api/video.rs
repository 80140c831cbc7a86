use anyhow::{Context, Result};
use reqwest::Method;
use serde_json::{Value, json};
use videoem_model::VideoCounter;

use crate::api::{Client, Validate};
use crate::error::VideoEmError;

impl Client {
    /// 读取计数、在本地加一再写回，返回写入的新值
    ///
    /// 这不是原子操作，多个观看者同时写入时会丢失计数，服务端目前没有提供原子自增接口
    pub async fn increment_counter(&self, video_id: &str, counter: VideoCounter) -> Result<u64> {
        let path = format!("/api/v1/update_video/{video_id}");
        let current = self
            .request(Method::GET, &path)?
            .send()
            .await?
            .validate()
            .context("failed to fetch current video data")?
            .json::<Value>()
            .await?;
        let field = counter.as_ref();
        let updated = current[field].as_u64().ok_or_else(|| {
            VideoEmError::MalformedResponse(format!("field '{field}' is missing or not a number"))
        })? + 1;
        self.mutate(Method::PATCH, &path)?
            .json(&json!({ field: updated }))
            .send()
            .await?
            .validate()
            .context("failed to update video")?;
        Ok(updated)
    }

    pub async fn add_history(&self, user: i64, video_id: &str) -> Result<()> {
        self.mutate(Method::POST, "/api/v1/history_add")?
            .json(&json!({ "user": user, "video": video_id }))
            .send()
            .await?
            .validate()
            .context("failed to add viewing history")?;
        Ok(())
    }
}
