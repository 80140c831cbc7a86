#[macro_use]
extern crate tracing;

mod api;
mod config;
mod error;
mod feed;
mod host;
mod page;
mod render;
mod utils;

use std::pin::pin;
use std::sync::Arc;

use anyhow::Result;
use futures::StreamExt;
use once_cell::sync::Lazy;

use crate::api::Client;
use crate::config::{ARGS, CONFIG, PageArgs, Settings, version};
use crate::feed::{Feed, Viewport};
use crate::host::StaticWebApp;
use crate::page::{
    AccountPage, AccountTab, EditVideoPage, MainPage, Navigation, Page, PageContext, SearchPage, SubscriptionsPage,
    TagSearchPage, ViewVideoPage,
};
use crate::render::{ClickOutcome, Document, Element, PreviewId};
use crate::utils::init_logger;

#[tokio::main]
async fn main() {
    Lazy::force(&ARGS);
    init_logger(&ARGS.log_level);
    info!("VideoEm 版本 {}", version());
    Lazy::force(&CONFIG);
    match run().await {
        Ok(html) => println!("{html}"),
        Err(e) => {
            error!("页面渲染失败：{:#}", e);
            std::process::exit(1);
        }
    }
}

fn context(layout: Vec<Element>) -> Result<PageContext> {
    let settings = Settings::from(&*CONFIG);
    let client = Client::new(&CONFIG.base_url, settings.csrf_token.clone())?;
    let host = Arc::new(StaticWebApp::new(Some(CONFIG.user.clone())));
    Ok(PageContext::new(client, Document::new(layout), host, settings))
}

async fn run() -> Result<String> {
    match &ARGS.page {
        PageArgs::Main => {
            let page = MainPage::new(context(MainPage::layout())?);
            drive(&page, Some(page.feed().clone())).await
        }
        PageArgs::Account { tab, switch_to } => {
            let tab = tab.parse::<AccountTab>()?;
            let page = AccountPage::new(context(AccountPage::layout(tab))?);
            page.on_load().await?;
            if let Some(target) = switch_to {
                page.switch_tab(target.parse::<AccountTab>()?).await?;
            }
            let feed = page.feed(page.active_tab()).clone();
            drive_loaded(&page, Some(feed)).await
        }
        PageArgs::Search { query, to_tag_search } => {
            let page = SearchPage::new(context(SearchPage::layout())?);
            page.on_load().await?;
            page.type_query(query)?;
            page.on_search_click().await?;
            let html = drive_loaded(&page, page.feed()).await?;
            if *to_tag_search {
                log_navigation(&page.to_tag_search());
            }
            Ok(html)
        }
        PageArgs::TagSearch { tags } => {
            let page = TagSearchPage::new(context(TagSearchPage::layout())?);
            page.on_load().await?;
            if !tags.is_empty() {
                for tag in tags {
                    if !page.set_checked(tag, true)? {
                        warn!("标签 {} 不存在，已忽略", tag);
                    }
                }
                page.search().await?;
            }
            drive_loaded(&page, page.feed()).await
        }
        PageArgs::Subscriptions => {
            let page = SubscriptionsPage::new(context(SubscriptionsPage::layout())?);
            page.on_load().await?;
            drive_loaded(&page, page.feed()).await
        }
        PageArgs::View {
            video_id,
            author_id,
            subscribe,
            like,
            star,
            count_view,
        } => {
            let page = ViewVideoPage::new(context(ViewVideoPage::layout())?, video_id.as_str(), *author_id);
            page.on_load().await?;
            if *subscribe {
                let subscribed = page.toggle_subscription().await?;
                info!("订阅状态已切换为 {}", subscribed);
            }
            if *like {
                page.like().await?;
            }
            if *star {
                info!("视频 {} 现在有 {} 颗星", video_id, page.add_star().await?);
            }
            match page.take_view_task() {
                Some(task) if *count_view => {
                    info!("等待 {:?} 后计入观看", page.context().settings.view_delay);
                    task.await?;
                }
                Some(task) => task.abort(),
                None => {}
            }
            page.to_html()
        }
        PageArgs::AddTag { tag } => {
            let page = EditVideoPage::new(context(EditVideoPage::layout())?);
            page.open_dialog()?;
            page.type_tag(tag)?;
            let navigation = page.add_tag().await?;
            if navigation == Navigation::Stay {
                warn!("标签 {} 规范化后为空，未创建", tag);
            }
            if page.is_dialog_open()? {
                page.close_dialog()?;
            }
            log_navigation(&navigation);
            page.to_html()
        }
    }
}

fn log_navigation(navigation: &Navigation) {
    match navigation {
        Navigation::Stay => {}
        Navigation::Goto(url) => info!("页面跳转到 {}", url),
        Navigation::Reload => info!("页面需要刷新"),
    }
}

/// 执行页面的 on_load，再按参数继续翻页
async fn drive(page: &impl Page, feed: Option<Arc<Feed>>) -> Result<String> {
    page.on_load().await?;
    drive_loaded(page, feed).await
}

async fn drive_loaded(page: &impl Page, feed: Option<Arc<Feed>>) -> Result<String> {
    if let (Some(feed), Some(cursor)) = (&feed, &ARGS.cursor) {
        let next = feed.load_page(Some(cursor)).await?;
        info!("游标 {} 的下一页为 {:?}", cursor, next);
    }
    match &feed {
        Some(feed) if ARGS.all => {
            let mut pages = pin!(feed.clone().into_page_stream());
            while let Some(count) = pages.next().await {
                debug!("追加了 {} 个视频", count?);
            }
        }
        _ => {
            for _ in 0..ARGS.scrolls {
                if let Some(handle) = page.on_scroll(Viewport::bottom()) {
                    handle.await?;
                }
            }
        }
    }
    if let Some(feed) = &feed {
        let state = feed.state();
        info!(
            "共渲染 {} 个视频，{}",
            state.rendered,
            if state.has_more { "还有更多" } else { "已全部加载" }
        );
    }
    let previews = &page.context().previews;
    for &id in &ARGS.click {
        let id = PreviewId::from(id);
        match previews.click(id)? {
            ClickOutcome::Preview => info!("视频卡片 {} 进入预览状态 {:?}", id, previews.state(id)),
            ClickOutcome::Navigate(href) => info!("跳转到 {}", href),
        }
    }
    page.to_html()
}
