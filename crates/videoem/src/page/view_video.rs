use anyhow::{Result, ensure};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use videoem_model::{Subscription, VideoCounter};

use crate::api::{Client, SubscriptionAction};
use crate::page::{Page, PageContext};
use crate::render::Element;

const SUBSCRIBE: &str = "Subscribe";
const UNSUBSCRIBE: &str = "Unsubscribe";

/// 观看页，负责订阅、打赏、点赞和观看计数
pub struct ViewVideoPage {
    ctx: PageContext,
    video_id: String,
    author_id: i64,
    view_task: Mutex<Option<JoinHandle<()>>>,
}

/// 观看数加一并写入观看历史
async fn count_view(client: &Client, user: i64, video_id: &str) -> Result<()> {
    let views = client.increment_counter(video_id, VideoCounter::ViewCount).await?;
    debug!("video {} now has {} views", video_id, views);
    client.add_history(user, video_id).await
}

impl ViewVideoPage {
    pub fn layout() -> Vec<Element> {
        vec![
            Element::new("button").with_id("btn_subscribe").with_text(SUBSCRIBE),
            Element::new("button").with_id("btn_like").with_text("Like"),
            Element::new("button").with_id("btn_star").with_text("Star"),
        ]
    }

    pub fn new(ctx: PageContext, video_id: impl Into<String>, author_id: i64) -> Self {
        ctx.required("btn_subscribe");
        ctx.required("btn_like");
        Self {
            ctx,
            video_id: video_id.into(),
            author_id,
            view_task: Mutex::new(None),
        }
    }

    /// 取出延迟计数的任务，调用方可以等待它完成
    pub fn take_view_task(&self) -> Option<JoinHandle<()>> {
        self.view_task.lock().take()
    }

    fn schedule_view_count(&self, viewer: i64) {
        let (client, video_id, delay) = (
            self.ctx.client.clone(),
            self.video_id.clone(),
            self.ctx.settings.view_delay,
        );
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = count_view(&client, viewer, &video_id).await {
                error!("Failed to count view of video {}: {:#}", video_id, e);
            }
        });
        // 重复进入页面时只保留最新的计时
        if let Some(old) = self.view_task.lock().replace(handle) {
            old.abort();
        }
    }

    pub fn is_subscribed(&self) -> Result<bool> {
        Ok(self.ctx.element("btn_subscribe")?.text() == UNSUBSCRIBE)
    }

    /// 切换订阅状态，只有请求成功后按钮文字才会改变，返回切换后的状态
    pub async fn toggle_subscription(&self) -> Result<bool> {
        let button = self.ctx.element("btn_subscribe")?;
        ensure!(
            button.read(|e| e.attr("disabled").is_none()),
            "cannot subscribe to yourself"
        );
        let viewer = self.ctx.telegram_id()?;
        let subscribed = self.is_subscribed()?;
        let action = if subscribed {
            SubscriptionAction::Unsubscribe
        } else {
            SubscriptionAction::Subscribe
        };
        let subscription = Subscription {
            from_user: viewer,
            to_user: self.author_id,
        };
        self.ctx
            .client
            .update_subscription(action, subscription)
            .await
            .inspect_err(|e| error!("Failed to {:?} user {}: {:#}", action, self.author_id, e))?;
        button.update(|e| e.set_text(if subscribed { SUBSCRIBE } else { UNSUBSCRIBE }));
        Ok(!subscribed)
    }

    /// 获取支付链接并交给宿主打开
    pub async fn like(&self) -> Result<()> {
        let viewer = self.ctx.telegram_id()?;
        let link = self
            .ctx
            .client
            .invoice_link(viewer, &self.video_id)
            .await
            .inspect_err(|e| error!("Failed to fetch invoice link: {:#}", e))?;
        self.ctx.host.open_invoice(&link);
        Ok(())
    }

    pub async fn add_star(&self) -> Result<u64> {
        self.ctx
            .client
            .increment_counter(&self.video_id, VideoCounter::Stars)
            .await
    }
}

impl Page for ViewVideoPage {
    fn context(&self) -> &PageContext {
        &self.ctx
    }

    async fn on_load(&self) -> Result<()> {
        let viewer = self.ctx.telegram_id()?;
        self.schedule_view_count(viewer);
        let button = self.ctx.element("btn_subscribe")?;
        if viewer == self.author_id {
            button.update(|e| e.set_attr("disabled", ""));
            return Ok(());
        }
        let subscriptions = self.ctx.client.subscriptions(viewer).await?;
        if subscriptions.is_subscribed_to(self.author_id) {
            button.update(|e| e.set_text(UNSUBSCRIBE));
        }
        Ok(())
    }
}
