mod account;
mod edit_video;
mod main_page;
mod search;
mod subscriptions;
mod tag_search;
mod view_video;

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;
use videoem_model::LinkMode;

pub use crate::page::account::{AccountPage, AccountTab};
pub use crate::page::edit_video::EditVideoPage;
pub use crate::page::main_page::MainPage;
pub use crate::page::search::SearchPage;
pub use crate::page::subscriptions::SubscriptionsPage;
pub use crate::page::tag_search::TagSearchPage;
pub use crate::page::view_video::ViewVideoPage;
use crate::api::{Client, FeedQuery};
use crate::config::Settings;
use crate::error::VideoEmError;
use crate::feed::{Feed, ScrollWatcher, Viewport};
use crate::host::WebApp;
use crate::render::{Document, ElementRef, PreviewBoard};

/// 页面处理器执行完毕后需要宿主完成的跳转
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Goto(String),
    Reload,
}

/// 一次页面会话的上下文，在进入页面时构建一次，之后传给所有处理器
#[derive(Clone)]
pub struct PageContext {
    pub client: Client,
    pub document: Document,
    pub host: Arc<dyn WebApp>,
    pub previews: PreviewBoard,
    pub scroll: ScrollWatcher,
    pub settings: Settings,
}

impl PageContext {
    pub fn new(client: Client, document: Document, host: Arc<dyn WebApp>, settings: Settings) -> Self {
        Self {
            client,
            document,
            host,
            previews: PreviewBoard::new(settings.preview_duration),
            scroll: ScrollWatcher::new(settings.scroll_throttle),
            settings,
        }
    }

    /// 查找页面必需的元素，缺失时只记录日志，依赖它的操作会在执行时失败
    pub fn required(&self, id: &str) -> Option<ElementRef> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            error!("Required DOM element '{}' is missing", id);
        }
        element
    }

    pub fn element(&self, id: &str) -> Result<ElementRef> {
        Ok(self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| VideoEmError::MissingElement(id.to_owned()))?)
    }

    /// 当前用户的 telegram_id
    pub fn telegram_id(&self) -> Result<i64> {
        Ok(self
            .host
            .user()
            .and_then(|user| user.id)
            .ok_or(VideoEmError::MissingParameter("telegram_id"))?)
    }

    /// 创建一个绑定到指定容器的新视频流
    pub fn feed(&self, container: Option<ElementRef>, query: FeedQuery<'_>, link_mode: LinkMode) -> Arc<Feed> {
        Feed::new(
            self.client.clone(),
            container,
            self.settings.thumbnail.clone(),
            self.previews.clone(),
            query,
            link_mode,
        )
    }
}

pub trait Page {
    fn context(&self) -> &PageContext;

    /// 页面加载完成时执行
    fn on_load(&self) -> impl Future<Output = Result<()>>;

    fn on_scroll(&self, viewport: Viewport) -> Option<JoinHandle<()>> {
        self.context().scroll.on_scroll(viewport)
    }

    fn to_html(&self) -> Result<String> {
        self.context().document.to_html()
    }
}
