mod scroll;
mod state;

use std::sync::Arc;

use anyhow::Result;
use async_stream::stream;
use futures::Stream;
use parking_lot::Mutex;
use videoem_model::LinkMode;

use crate::api::{Client, FeedQuery};
use crate::error::VideoEmError;
pub use crate::feed::scroll::{ScrollWatcher, Viewport};
pub use crate::feed::state::PaginationState;
use crate::render::{ElementRef, PreviewBoard, VideoCardBuilder, append_cards};

/// 一个绑定到容器的视频流，只会向容器末尾追加卡片
pub struct Feed {
    client: Client,
    container: Option<ElementRef>,
    thumbnail: String,
    previews: PreviewBoard,
    state: Mutex<PaginationState>,
}

/// 离开作用域时释放加载标记，请求失败时同样会释放
struct LoadingGuard<'a>(&'a Mutex<PaginationState>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.lock().is_loading = false;
    }
}

impl Feed {
    pub fn new(
        client: Client,
        container: Option<ElementRef>,
        thumbnail: String,
        previews: PreviewBoard,
        query: FeedQuery<'_>,
        link_mode: LinkMode,
    ) -> Arc<Self> {
        Arc::new(Self {
            client,
            container,
            thumbnail,
            previews,
            state: Mutex::new(PaginationState::new(query.initial_cursor(), link_mode)),
        })
    }

    pub fn state(&self) -> PaginationState {
        self.state.lock().clone()
    }

    pub fn has_more(&self) -> bool {
        self.state.lock().has_more
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    /// 请求游标指向的一页并渲染，返回下一页的游标
    ///
    /// 游标为空或者已经没有更多数据时不发起请求，直接返回 None；
    /// 请求失败时记录日志并返回错误，不会重试，也不会改变 has_more
    pub async fn load_page(&self, cursor: Option<&str>) -> Result<Option<String>> {
        Ok(self.load(cursor).await?.0)
    }

    /// 占用加载标记后加载下一页，返回本次追加的卡片数量
    ///
    /// 已经在加载或者没有更多数据时返回 None，请求失败时保留原游标，下一次触发可以重试
    pub async fn load_next(&self) -> Result<Option<usize>> {
        let Some(cursor) = self.state.lock().begin_load() else {
            return Ok(None);
        };
        let _guard = LoadingGuard(&self.state);
        let (next, count) = self.load(Some(&cursor)).await?;
        self.state.lock().next_cursor = next;
        Ok(Some(count))
    }

    async fn load(&self, cursor: Option<&str>) -> Result<(Option<String>, usize)> {
        let Some(cursor) = cursor.filter(|c| !c.is_empty()) else {
            return Ok((None, 0));
        };
        if !self.has_more() {
            return Ok((None, 0));
        }
        match self.fetch_and_render(cursor).await {
            Ok(res) => Ok(res),
            Err(e) => {
                let retryable = e.downcast_ref::<VideoEmError>().is_some_and(VideoEmError::is_status);
                error!(
                    "failed to load videos from {}: {:#}{}",
                    cursor,
                    e,
                    if retryable { ", will retry on next scroll" } else { "" }
                );
                Err(e)
            }
        }
    }

    async fn fetch_and_render(&self, cursor: &str) -> Result<(Option<String>, usize)> {
        let page = self.client.feed_page(cursor).await?;
        if page.results.is_empty() {
            debug!("no more videos after {}", cursor);
            self.state.lock().has_more = false;
            return Ok((None, 0));
        }
        let link_mode = self.state.lock().link_mode.clone();
        let builder = VideoCardBuilder::new(&self.thumbnail, &self.previews);
        let cards = page
            .results
            .iter()
            .map(|video| builder.build(video, &link_mode))
            .collect::<Result<Vec<_>>>()?;
        let count = append_cards(self.container.as_ref(), cards)?;
        self.state.lock().rendered += count;
        debug!("rendered {} videos from {}", count, cursor);
        Ok((page.next, count))
    }

    /// 拿到视频流的所有权，逐页加载直到没有更多数据，每一项是该页追加的卡片数量
    pub fn into_page_stream(self: Arc<Self>) -> impl Stream<Item = Result<usize>> {
        stream! {
            loop {
                match self.load_next().await {
                    Ok(Some(count)) => yield Ok(count),
                    Ok(None) => break,
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                }
            }
        }
    }
}
