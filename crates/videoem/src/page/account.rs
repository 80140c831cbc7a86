use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use strum::{AsRefStr, EnumString};
use videoem_model::{LinkMode, UserProfile};

use crate::api::FeedQuery;
use crate::feed::Feed;
use crate::page::{Page, PageContext};
use crate::render::{Element, format_db_time};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
pub enum AccountTab {
    /// 我上传的视频，卡片链接到编辑页
    #[strum(serialize = "tab1")]
    MyVideos,
    /// 观看历史
    #[strum(serialize = "tab2")]
    History,
}

/// 个人主页：用户信息加上两个各自分页的标签页
pub struct AccountPage {
    ctx: PageContext,
    my_videos: Arc<Feed>,
    history: Arc<Feed>,
    active: Mutex<AccountTab>,
}

impl AccountPage {
    pub fn layout(active: AccountTab) -> Vec<Element> {
        let mut layout = vec![
            Element::new("img").with_id("tg_picture"),
            Element::new("div").with_id("full_name"),
            Element::new("div").with_id("time_create"),
            Element::new("div").with_id("stars_count"),
            Element::new("div").with_id("video_count"),
            Element::new("div").with_id("username"),
        ];
        for (tab, container) in [(AccountTab::MyVideos, "videoTable"), (AccountTab::History, "history")] {
            let mut button = Element::new("button")
                .with_class("tab")
                .with_attr("data-tab", tab.as_ref());
            let mut content = Element::new("table")
                .with_id(container)
                .with_class("tab-content")
                .with_attr("data-tab", tab.as_ref());
            if tab == active {
                button.add_class("active");
                content.add_class("active");
            }
            layout.push(button);
            layout.push(content);
        }
        layout
    }

    pub fn new(ctx: PageContext) -> Self {
        // 缺少用户 id 时请求会被服务端拒绝，错误在加载时暴露
        let telegram_id = ctx.telegram_id().unwrap_or_else(|e| {
            error!("{:#}", e);
            0
        });
        let my_videos = ctx.feed(
            ctx.required("videoTable"),
            FeedQuery::Uploads(telegram_id),
            LinkMode::Edit,
        );
        let history = ctx.feed(ctx.required("history"), FeedQuery::WatchedBy(telegram_id), LinkMode::Watch);
        let active = ctx
            .document
            .query_class("tab")
            .into_iter()
            .find(|tab| tab.read(|e| e.has_class("active")))
            .and_then(|tab| tab.read(|e| e.attr("data-tab").and_then(|t| t.parse().ok())))
            .unwrap_or(AccountTab::MyVideos);
        let page = Self {
            ctx,
            my_videos,
            history,
            active: Mutex::new(active),
        };
        page.ctx.scroll.attach(page.feed(active).clone());
        page
    }

    pub fn feed(&self, tab: AccountTab) -> &Arc<Feed> {
        match tab {
            AccountTab::MyVideos => &self.my_videos,
            AccountTab::History => &self.history,
        }
    }

    pub fn active_tab(&self) -> AccountTab {
        *self.active.lock()
    }

    /// 切换到指定标签页并加载该标签页视频流的下一页
    pub async fn switch_tab(&self, tab: AccountTab) -> Result<()> {
        for element in self
            .ctx
            .document
            .query_class("tab")
            .into_iter()
            .chain(self.ctx.document.query_class("tab-content"))
        {
            element.update(|e| {
                if e.attr("data-tab") == Some(tab.as_ref()) {
                    e.add_class("active");
                } else {
                    e.remove_class("active");
                }
            });
        }
        *self.active.lock() = tab;
        let feed = self.feed(tab).clone();
        self.ctx.scroll.attach(feed.clone());
        feed.load_next().await?;
        Ok(())
    }

    async fn load_profile(&self) -> Result<()> {
        let telegram_id = self.ctx.telegram_id()?;
        let profile = self.ctx.client.user_get(telegram_id).await?;
        self.render_profile(&profile)
    }

    fn render_profile(&self, profile: &UserProfile) -> Result<()> {
        let user = self.ctx.host.user();
        let photo_url = user.and_then(|u| u.photo_url.clone()).unwrap_or_default();
        let username = user.and_then(|u| u.username.clone()).unwrap_or_default();
        self.ctx.element("tg_picture")?.update(|e| e.set_attr("src", photo_url));
        self.ctx
            .element("full_name")?
            .update(|e| e.set_text(profile.telegram_fullname.as_str()));
        self.ctx
            .element("time_create")?
            .update(|e| e.set_text(format!("Register date: {}", format_db_time(&profile.time_create))));
        self.ctx
            .element("stars_count")?
            .update(|e| e.set_text(format!("Stars: {}", profile.stars_count)));
        self.ctx
            .element("video_count")?
            .update(|e| e.set_text(format!("Videos: {}", profile.video_count)));
        self.ctx
            .element("username")?
            .update(|e| e.set_text(format!("Username: @{username}")));
        Ok(())
    }
}

impl Page for AccountPage {
    fn context(&self) -> &PageContext {
        &self.ctx
    }

    async fn on_load(&self) -> Result<()> {
        // 用户信息加载失败不影响视频列表
        if let Err(e) = self.load_profile().await {
            error!("Error fetching profile: {:#}", e);
        }
        self.feed(self.active_tab()).load_next().await?;
        Ok(())
    }
}
