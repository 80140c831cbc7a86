use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use videoem_model::LinkMode;

use crate::api::FeedQuery;
use crate::feed::Feed;
use crate::page::{Page, PageContext};
use crate::render::{Element, ElementRef};

/// 订阅页，展示当前用户订阅的所有作者上传的视频
pub struct SubscriptionsPage {
    ctx: PageContext,
    table: Option<ElementRef>,
    feed: Mutex<Option<Arc<Feed>>>,
}

impl SubscriptionsPage {
    pub fn layout() -> Vec<Element> {
        vec![Element::new("table").with_id("videoTable")]
    }

    pub fn new(ctx: PageContext) -> Self {
        let table = ctx.required("videoTable");
        Self {
            ctx,
            table,
            feed: Mutex::new(None),
        }
    }

    /// 没有任何订阅时为 None
    pub fn feed(&self) -> Option<Arc<Feed>> {
        self.feed.lock().clone()
    }
}

impl Page for SubscriptionsPage {
    fn context(&self) -> &PageContext {
        &self.ctx
    }

    async fn on_load(&self) -> Result<()> {
        let telegram_id = self.ctx.telegram_id()?;
        let targets = self
            .ctx
            .client
            .subscriptions(telegram_id)
            .await
            .inspect_err(|e| error!("Failed to fetch subscriptions: {:#}", e))?
            .targets()
            .collect::<Vec<_>>();
        if targets.is_empty() {
            info!("User {} has no subscriptions", telegram_id);
            return Ok(());
        }
        let feed = self
            .ctx
            .feed(self.table.clone(), FeedQuery::UploadsOf(&targets), LinkMode::Watch);
        *self.feed.lock() = Some(feed.clone());
        self.ctx.scroll.attach(feed.clone());
        feed.load_next().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::Json;
    use axum::extract::Query;
    use axum::routing::get;
    use serde_json::json;

    use super::*;
    use crate::utils::testing::{Hits, TEST_USER_ID, feed_router, spawn_server, test_context};

    fn router(hits: Hits, to_users: &'static [i64]) -> axum::Router {
        feed_router("/api/v1/video_get", hits, 2).route(
            "/api/v1/subscriptions",
            get(move |Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("telegram_id"), Some(&TEST_USER_ID.to_string()));
                let subscriptions = to_users
                    .iter()
                    .map(|to_user| json!({"from_user": TEST_USER_ID, "to_user": to_user}))
                    .collect::<Vec<_>>();
                Json(json!({ "subscriptions": subscriptions }))
            }),
        )
    }

    #[tokio::test]
    async fn test_subscriptions_feed() {
        let hits = Hits::default();
        let base = spawn_server(router(hits.clone(), &[7, 9])).await;
        let page = SubscriptionsPage::new(test_context(&base, SubscriptionsPage::layout()));
        page.on_load().await.unwrap();
        assert_eq!(hits.count(), 1);
        assert_eq!(hits.all()[0].get("users").map(String::as_str), Some("7,9"));
        assert_eq!(page.context().document.get_element_by_id("videoTable").unwrap().len(), 2);
        assert!(page.feed().is_some());
    }

    #[tokio::test]
    async fn test_no_subscriptions() {
        let hits = Hits::default();
        let base = spawn_server(router(hits.clone(), &[])).await;
        let page = SubscriptionsPage::new(test_context(&base, SubscriptionsPage::layout()));
        page.on_load().await.unwrap();
        assert_eq!(hits.count(), 0);
        assert!(page.feed().is_none());
    }
}
