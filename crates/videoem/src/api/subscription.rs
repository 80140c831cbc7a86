use anyhow::Result;
use reqwest::Method;
use videoem_model::{Subscription, SubscriptionList};

use crate::api::{Client, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionAction {
    Subscribe,
    Unsubscribe,
}

impl SubscriptionAction {
    fn method(self) -> Method {
        match self {
            SubscriptionAction::Subscribe => Method::POST,
            SubscriptionAction::Unsubscribe => Method::DELETE,
        }
    }
}

impl Client {
    pub async fn subscriptions(&self, telegram_id: i64) -> Result<SubscriptionList> {
        Ok(self
            .request(Method::GET, "/api/v1/subscriptions")?
            .query(&[("telegram_id", telegram_id)])
            .send()
            .await?
            .validate()?
            .json::<SubscriptionList>()
            .await?)
    }

    pub async fn update_subscription(&self, action: SubscriptionAction, subscription: Subscription) -> Result<()> {
        self.mutate(action.method(), "/api/v1/subscriptions")?
            .json(&subscription)
            .send()
            .await?
            .validate()?;
        Ok(())
    }
}
