use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::feed::Feed;

/// 滚动事件发生时视口的位置信息
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub inner_height: f64,
    pub scroll_y: f64,
    pub document_height: f64,
}

impl Viewport {
    /// 已经滚动到页面底部的视口
    pub fn bottom() -> Self {
        Self {
            inner_height: 1.0,
            scroll_y: 0.0,
            document_height: 1.0,
        }
    }

    pub fn near_bottom(&self) -> bool {
        self.inner_height + self.scroll_y >= self.document_height
    }
}

#[derive(Default)]
struct WatcherState {
    pending: bool,
    viewport: Viewport,
    feed: Option<Arc<Feed>>,
}

/// 对滚动事件节流：同一时间最多只有一个待触发的定时器，定时器触发时按最新的视口判断是否加载下一页
#[derive(Clone)]
pub struct ScrollWatcher {
    delay: Duration,
    state: Arc<Mutex<WatcherState>>,
}

impl ScrollWatcher {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: Arc::default(),
        }
    }

    /// 切换滚动驱动的视频流，例如切换标签页或发起新的搜索
    pub fn attach(&self, feed: Arc<Feed>) {
        self.state.lock().feed = Some(feed);
    }

    /// 处理一次滚动事件，只有新建了定时器时返回对应的任务句柄
    pub fn on_scroll(&self, viewport: Viewport) -> Option<JoinHandle<()>> {
        {
            let mut state = self.state.lock();
            state.viewport = viewport;
            if state.pending {
                return None;
            }
            state.pending = true;
        }
        let (delay, state) = (self.delay, self.state.clone());
        Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let (viewport, feed) = {
                let mut state = state.lock();
                state.pending = false;
                (state.viewport, state.feed.clone())
            };
            let Some(feed) = feed else {
                return;
            };
            if viewport.near_bottom() && !feed.is_loading() && feed.has_more() {
                // 错误已经在视频流中记录，这里只需要保证不影响后续的滚动事件
                if let Err(e) = feed.load_next().await {
                    debug!("scroll triggered load failed: {:#}", e);
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_bottom() {
        let viewport = Viewport {
            inner_height: 800.0,
            scroll_y: 1200.0,
            document_height: 2000.0,
        };
        assert!(viewport.near_bottom());
        let viewport = Viewport {
            inner_height: 800.0,
            scroll_y: 100.0,
            document_height: 2000.0,
        };
        assert!(!viewport.near_bottom());
        assert!(Viewport::bottom().near_bottom());
    }

    #[tokio::test]
    async fn test_scroll_throttle() {
        let watcher = ScrollWatcher::new(Duration::from_millis(50));
        let first = watcher.on_scroll(Viewport::default());
        assert!(first.is_some());
        for _ in 0..10 {
            assert!(watcher.on_scroll(Viewport::bottom()).is_none());
        }
        first.unwrap().await.unwrap();
        // 定时器触发后可以再次设置
        let next = watcher.on_scroll(Viewport::default());
        assert!(next.is_some());
        next.unwrap().await.unwrap();
    }
}
