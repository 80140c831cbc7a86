use std::sync::Arc;

use anyhow::Result;
use videoem_model::LinkMode;

use crate::api::FeedQuery;
use crate::feed::Feed;
use crate::page::{Page, PageContext};
use crate::render::Element;

/// 首页，展示所有视频
pub struct MainPage {
    ctx: PageContext,
    feed: Arc<Feed>,
}

impl MainPage {
    pub fn layout() -> Vec<Element> {
        vec![Element::new("table").with_id("videoTable")]
    }

    pub fn new(ctx: PageContext) -> Self {
        let feed = ctx.feed(ctx.required("videoTable"), FeedQuery::All, LinkMode::Watch);
        ctx.scroll.attach(feed.clone());
        Self { ctx, feed }
    }

    pub fn feed(&self) -> &Arc<Feed> {
        &self.feed
    }
}

impl Page for MainPage {
    fn context(&self) -> &PageContext {
        &self.ctx
    }

    async fn on_load(&self) -> Result<()> {
        self.feed.load_next().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Viewport;
    use crate::utils::testing::{Hits, feed_router, spawn_server, test_context};

    #[tokio::test]
    async fn test_main_page_scroll() {
        let hits = Hits::default();
        let base = spawn_server(feed_router("/api/v1/video_get", hits.clone(), 3)).await;
        let page = MainPage::new(test_context(&base, MainPage::layout()));
        page.on_load().await.unwrap();
        assert_eq!(hits.count(), 1);

        // 连续的滚动事件只会触发一次加载
        let handle = page.on_scroll(Viewport::bottom()).unwrap();
        for _ in 0..20 {
            assert!(page.on_scroll(Viewport::bottom()).is_none());
        }
        handle.await.unwrap();
        assert_eq!(hits.count(), 2);

        // 没有滚动到底部时不加载
        let viewport = Viewport {
            inner_height: 100.0,
            scroll_y: 0.0,
            document_height: 1000.0,
        };
        page.on_scroll(viewport).unwrap().await.unwrap();
        assert_eq!(hits.count(), 2);

        for _ in 0..3 {
            page.on_scroll(Viewport::bottom()).unwrap().await.unwrap();
        }
        // 第三页为空，之后不再请求
        assert_eq!(hits.count(), 3);
        assert!(!page.feed().has_more());
        let table = page.context().document.get_element_by_id("videoTable").unwrap();
        assert_eq!(table.len(), 4);
        assert!(page.to_html().unwrap().starts_with("<table id=\"videoTable\"><tr><td><div class=\"video-preview\""));
    }

    #[tokio::test]
    async fn test_main_page_without_table() {
        let hits = Hits::default();
        let base = spawn_server(feed_router("/api/v1/video_get", hits.clone(), 3)).await;
        let page = MainPage::new(test_context(&base, vec![]));
        let err = page.on_load().await.unwrap_err();
        assert!(err.to_string().contains("is missing"));
        // 渲染失败不会卡住加载标记
        assert!(!page.feed().is_loading());
        assert!(page.feed().has_more());
    }
}
