use anyhow::Result;
use reqwest::Method;
use videoem_model::UserProfile;

use crate::api::{Client, Validate};

impl Client {
    pub async fn user_get(&self, telegram_id: i64) -> Result<UserProfile> {
        Ok(self
            .request(Method::GET, &format!("/api/v1/user_get/{telegram_id}"))?
            .send()
            .await?
            .validate()?
            .json::<UserProfile>()
            .await?)
    }
}
