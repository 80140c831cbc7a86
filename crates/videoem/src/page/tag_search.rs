use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use videoem_model::{LinkMode, Tag};

use crate::api::FeedQuery;
use crate::feed::Feed;
use crate::page::{Page, PageContext};
use crate::render::{Element, ElementRef};

fn is_tag_checkbox(e: &Element) -> bool {
    e.tag() == "input" && e.attr("name") == Some("tag")
}

pub struct TagSearchPage {
    ctx: PageContext,
    table: Option<ElementRef>,
    feed: Mutex<Option<Arc<Feed>>>,
}

impl TagSearchPage {
    pub fn layout() -> Vec<Element> {
        vec![
            Element::new("div").with_id("tag_search"),
            Element::new("div").with_id("tags_set"),
            Element::new("button").with_id("btn_search").with_text("Search"),
            Element::new("table").with_id("videoTable"),
        ]
    }

    pub fn new(ctx: PageContext) -> Self {
        ctx.required("btn_search");
        ctx.required("tags_set");
        ctx.required("tag_search");
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

    fn render_tags(&self, tags: &[Tag]) -> Result<()> {
        let checkboxes = tags.iter().map(|tag| {
            Element::new("div")
                .with_class("checkbox_container")
                .with_child(
                    Element::new("input")
                        .with_attr("type", "checkbox")
                        .with_id(tag.tag.as_str())
                        .with_attr("name", "tag"),
                )
                .with_child(
                    Element::new("label")
                        .with_attr("for", tag.tag.as_str())
                        .with_text(format!("  {}", tag.tag)),
                )
        });
        self.ctx.element("tags_set")?.update(|e| e.append(checkboxes));
        Ok(())
    }

    /// 勾选或取消勾选某个标签
    pub fn set_checked(&self, tag: &str, checked: bool) -> Result<bool> {
        Ok(self.ctx.element("tags_set")?.update(|e| {
            match e.find_mut(&|e| is_tag_checkbox(e) && e.id() == Some(tag)) {
                Some(input) if checked => input.set_attr("checked", ""),
                Some(input) => input.remove_attr("checked"),
                None => return false,
            }
            true
        }))
    }

    pub fn checked_tags(&self) -> Result<Vec<String>> {
        Ok(self.ctx.element("tags_set")?.read(|e| {
            let mut inputs = Vec::new();
            e.find_all(&|e| is_tag_checkbox(e) && e.attr("checked").is_some(), &mut inputs);
            inputs.iter().filter_map(|input| input.id().map(str::to_owned)).collect()
        }))
    }

    /// 隐藏标签面板，按勾选的标签发起新的搜索
    pub async fn search(&self) -> Result<()> {
        self.ctx
            .element("tag_search")?
            .update(|e| e.set_attr("style", "display: none;"));
        let tags = self.checked_tags()?;
        let feed = self
            .ctx
            .feed(self.table.clone(), FeedQuery::Tags(&tags), LinkMode::Watch);
        *self.feed.lock() = Some(feed.clone());
        self.ctx.scroll.attach(feed.clone());
        feed.load_next().await?;
        Ok(())
    }
}

impl Page for TagSearchPage {
    fn context(&self) -> &PageContext {
        &self.ctx
    }

    async fn on_load(&self) -> Result<()> {
        let tags = self.ctx.client.get_tags().await.inspect_err(|e| {
            error!("Failed to fetch tags: {:#}", e);
        })?;
        self.render_tags(&tags)
    }
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::routing::get;
    use serde_json::json;

    use super::*;
    use crate::utils::testing::{Hits, feed_router, spawn_server, test_context};

    #[tokio::test]
    async fn test_tag_search_page() {
        let hits = Hits::default();
        let router = feed_router("/api/v1/search", hits.clone(), 3).route(
            "/api/v1/get_tag",
            get(|| async { Json(json!([{"tag": "cats"}, {"tag": "dogs"}, {"tag": "music"}])) }),
        );
        let base = spawn_server(router).await;
        let page = TagSearchPage::new(test_context(&base, TagSearchPage::layout()));
        page.on_load().await.unwrap();

        let tags_set = page.context().document.get_element_by_id("tags_set").unwrap();
        assert_eq!(tags_set.len(), 3);
        assert!(tags_set.snapshot().to_html().unwrap().contains(
            r#"<div class="checkbox_container"><input type="checkbox" id="cats" name="tag"/><label for="cats">  cats</label></div>"#
        ));

        assert!(page.set_checked("cats", true).unwrap());
        assert!(page.set_checked("music", true).unwrap());
        assert!(page.set_checked("music", false).unwrap());
        assert!(page.set_checked("dogs", true).unwrap());
        assert!(!page.set_checked("unknown", true).unwrap());
        assert_eq!(page.checked_tags().unwrap(), vec!["cats", "dogs"]);

        page.search().await.unwrap();
        assert_eq!(hits.all()[0].get("tags").map(String::as_str), Some("cats,dogs"));
        assert_eq!(
            page.context()
                .document
                .get_element_by_id("tag_search")
                .unwrap()
                .read(|e| e.attr("style").map(str::to_owned)),
            Some("display: none;".to_owned())
        );
        assert_eq!(page.context().document.get_element_by_id("videoTable").unwrap().len(), 2);
        assert!(page.feed().unwrap().has_more());
    }
}
