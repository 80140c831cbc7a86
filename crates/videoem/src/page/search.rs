use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use videoem_model::LinkMode;

use crate::api::FeedQuery;
use crate::feed::Feed;
use crate::page::{Navigation, Page, PageContext};
use crate::render::{Element, ElementRef};

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("invalid regex"));

/// 搜索词只保留字母和数字
pub fn sanitize_query(raw: &str) -> String {
    NON_ALPHANUMERIC.replace_all(raw, "").trim().to_owned()
}

pub struct SearchPage {
    ctx: PageContext,
    table: Option<ElementRef>,
    feed: Mutex<Option<Arc<Feed>>>,
}

impl SearchPage {
    pub fn layout() -> Vec<Element> {
        vec![
            Element::new("input").with_id("search_field").with_attr("type", "text"),
            Element::new("button").with_id("btn_search").with_text("Search"),
            Element::new("button").with_id("btn_to_tag_search").with_text("Tags"),
            Element::new("table").with_id("videoTable"),
        ]
    }

    pub fn new(ctx: PageContext) -> Self {
        ctx.required("btn_search");
        ctx.required("btn_to_tag_search");
        ctx.required("search_field");
        let table = ctx.required("videoTable");
        Self {
            ctx,
            table,
            feed: Mutex::new(None),
        }
    }

    pub fn feed(&self) -> Option<Arc<Feed>> {
        self.feed.lock().clone()
    }

    /// 在搜索框中输入内容
    pub fn type_query(&self, raw: &str) -> Result<()> {
        self.ctx.element("search_field")?.update(|e| e.set_attr("value", raw));
        Ok(())
    }

    /// 对应搜索按钮，读取输入框中的内容发起搜索
    pub async fn on_search_click(&self) -> Result<()> {
        let query = self
            .ctx
            .element("search_field")?
            .read(|e| e.attr("value").unwrap_or_default().to_owned());
        self.search(&query).await
    }

    /// 每次搜索都使用一个新的视频流，结果追加在已有结果之后
    pub async fn search(&self, raw: &str) -> Result<()> {
        let query = sanitize_query(raw);
        if query.is_empty() {
            return Ok(());
        }
        let feed = self
            .ctx
            .feed(self.table.clone(), FeedQuery::Search(&query), LinkMode::Watch);
        *self.feed.lock() = Some(feed.clone());
        self.ctx.scroll.attach(feed.clone());
        feed.load_next().await?;
        Ok(())
    }

    pub fn to_tag_search(&self) -> Navigation {
        Navigation::Goto("/tag_search/".to_owned())
    }
}

impl Page for SearchPage {
    fn context(&self) -> &PageContext {
        &self.ctx
    }

    async fn on_load(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::{Hits, feed_router, spawn_server, test_context};

    #[test]
    fn test_sanitize_query() {
        assert_eq!(sanitize_query("  funny cats!! "), "funnycats");
        assert_eq!(sanitize_query("котики"), "");
        assert_eq!(sanitize_query("C++ 2024"), "C2024");
    }

    #[tokio::test]
    async fn test_search_page() {
        let hits = Hits::default();
        let base = spawn_server(feed_router("/api/v1/search", hits.clone(), 2)).await;
        let page = SearchPage::new(test_context(&base, SearchPage::layout()));

        page.search("?!").await.unwrap();
        assert_eq!(hits.count(), 0);
        assert!(page.feed().is_none());

        page.type_query("funny cats").unwrap();
        page.on_search_click().await.unwrap();
        assert_eq!(hits.all()[0].get("q").map(String::as_str), Some("funnycats"));
        let first = page.feed().unwrap();
        first.load_next().await.unwrap();
        assert!(!first.has_more());

        // 新的搜索重置分页状态
        page.search("dogs").await.unwrap();
        let second = page.feed().unwrap();
        assert!(second.has_more());
        assert_eq!(hits.all()[2].get("q").map(String::as_str), Some("dogs"));
        let table = page.context().document.get_element_by_id("videoTable").unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(page.to_tag_search(), Navigation::Goto("/tag_search/".to_owned()));
    }
}
