use anyhow::{Result, bail, ensure};
use itertools::Itertools;
use reqwest::Method;
use serde_json::Value;
use videoem_model::{FeedPage, VideoRecord};

use crate::api::{Client, Validate};
use crate::error::VideoEmError;

/// 各个页面使用的视频流起点
#[derive(Debug, Clone, Copy)]
pub enum FeedQuery<'a> {
    /// 首页的全部视频
    All,
    /// 某个用户上传的视频
    Uploads(i64),
    /// 多个用户上传的视频，用于订阅页
    UploadsOf(&'a [i64]),
    /// 某个用户的观看历史
    WatchedBy(i64),
    /// 关键词搜索
    Search(&'a str),
    /// 标签搜索
    Tags(&'a [String]),
}

impl FeedQuery<'_> {
    /// 第一页的地址，之后的每一页都使用服务端返回的 next
    pub fn initial_cursor(&self) -> String {
        let (path, query) = match self {
            FeedQuery::All => ("/api/v1/video_get", None),
            FeedQuery::Uploads(user) => ("/api/v1/video_get", Some(("user", user.to_string()))),
            FeedQuery::UploadsOf(users) => ("/api/v1/video_get", Some(("users", users.iter().join(",")))),
            FeedQuery::WatchedBy(user) => ("/api/v1/watched_videos", Some(("user", user.to_string()))),
            FeedQuery::Search(query) => ("/api/v1/search", Some(("q", query.to_string()))),
            FeedQuery::Tags(tags) => ("/api/v1/search", Some(("tags", tags.iter().join(",")))),
        };
        match query {
            Some(pair) => format!(
                "{}?{}",
                path,
                serde_urlencoded::to_string([pair]).unwrap_or_default()
            ),
            None => path.to_owned(),
        }
    }
}

impl Client {
    /// 请求游标指向的一页视频
    pub async fn feed_page(&self, cursor: &str) -> Result<FeedPage> {
        let value = self
            .request(Method::GET, cursor)?
            .send()
            .await?
            .validate()?
            .json::<Value>()
            .await?;
        parse_feed_page(value)
    }
}

/// 逐条校验 results，非数组的结果集和非对象的视频都直接拒绝
pub(crate) fn parse_feed_page(mut value: Value) -> Result<FeedPage> {
    ensure!(
        value.is_object(),
        VideoEmError::MalformedResponse(format!("expected an object, got {value}"))
    );
    let results = match value.get_mut("results").map(Value::take) {
        Some(Value::Array(items)) => items,
        other => bail!(VideoEmError::MalformedResponse(format!(
            "results must be an array, got {}",
            other.unwrap_or(Value::Null)
        ))),
    };
    let next = match value.get_mut("next").map(Value::take) {
        Some(Value::String(next)) if !next.is_empty() => Some(next),
        Some(Value::String(_)) | Some(Value::Null) | None => None,
        Some(other) => bail!(VideoEmError::MalformedResponse(format!(
            "next must be a string or null, got {other}"
        ))),
    };
    let results = results
        .into_iter()
        .map(|item| {
            ensure!(
                item.is_object(),
                VideoEmError::InvalidVideo(format!("must be an object, got {item}"))
            );
            serde_json::from_value::<VideoRecord>(item)
                .map_err(|e| anyhow::Error::from(VideoEmError::InvalidVideo(e.to_string())))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(FeedPage { results, next })
}
