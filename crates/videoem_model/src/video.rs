use serde::{Deserialize, Deserializer};
use strum::{AsRefStr, EnumString};

/// 单个视频的信息，字段与服务端 Video 序列化器保持一致
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub video_id: String,
    #[serde(default)]
    pub video_slug: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub temp_link: Option<String>,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub username: String,
}

/// video_id 在服务端是字符串，但也可能以数字的形式出现
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(i64),
    }
    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}

/// 视频卡片的链接模式，决定点击卡片后跳转到观看页还是编辑页
#[derive(Debug, Clone, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LinkMode {
    Watch,
    Edit,
    /// 未知的模式不报错，生成空链接
    #[strum(default)]
    Other(String),
}

/// 可以通过 update_video 接口自增的计数字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum VideoCounter {
    #[strum(serialize = "view_count")]
    ViewCount,
    #[strum(serialize = "stars")]
    Stars,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_record_deserialize() {
        let video: VideoRecord = serde_json::from_value(serde_json::json!({
            "video_id": 7,
            "video_slug": "abc",
            "title": null,
            "temp_link": "https://cdn.example/file.mp4",
            "view_count": 3,
            "stars": 1,
            "username": "Alice",
            "tags": ["cats"],
        }))
        .unwrap();
        assert_eq!(video.video_id, "7");
        assert_eq!(video.title, None);
        let video: VideoRecord =
            serde_json::from_value(serde_json::json!({"video_id": "BAACAgIAAxk", "username": "Bob"})).unwrap();
        assert_eq!(video.video_id, "BAACAgIAAxk");
        assert_eq!(video.view_count, 0);
        assert!(serde_json::from_value::<VideoRecord>(serde_json::json!("not a video")).is_err());
    }

    #[test]
    fn test_link_mode_parse() {
        assert_eq!("watch".parse::<LinkMode>().unwrap(), LinkMode::Watch);
        assert_eq!("edit".parse::<LinkMode>().unwrap(), LinkMode::Edit);
        assert_eq!(
            "delete".parse::<LinkMode>().unwrap(),
            LinkMode::Other("delete".to_owned())
        );
        assert_eq!(VideoCounter::ViewCount.as_ref(), "view_count");
        assert_eq!(VideoCounter::Stars.as_ref(), "stars");
    }
}
