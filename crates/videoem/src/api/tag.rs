use anyhow::Result;
use reqwest::Method;
use serde_json::json;
use videoem_model::Tag;

use crate::api::{Client, Validate};

impl Client {
    pub async fn get_tags(&self) -> Result<Vec<Tag>> {
        Ok(self
            .request(Method::GET, "/api/v1/get_tag")?
            .send()
            .await?
            .validate()?
            .json::<Vec<Tag>>()
            .await?)
    }

    pub async fn create_tag(&self, tag: &str) -> Result<()> {
        self.mutate(Method::POST, "/api/v1/create_tag")?
            .json(&json!({ "tag": tag }))
            .send()
            .await?
            .validate()?;
        Ok(())
    }
}
