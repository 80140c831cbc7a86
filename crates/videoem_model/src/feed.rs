use serde::Deserialize;

use crate::VideoRecord;

/// 游标分页接口返回的一页数据，next 为空或 results 为空表示没有更多数据
#[derive(Debug, Clone, Deserialize)]
pub struct FeedPage<T = VideoRecord> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> FeedPage<T> {
    pub fn is_last(&self) -> bool {
        self.results.is_empty() || self.next.is_none()
    }
}
