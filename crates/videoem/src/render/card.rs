use anyhow::{Result, ensure};
use videoem_model::{LinkMode, VideoRecord};

use crate::api::proxy_video_path;
use crate::error::VideoEmError;
use crate::render::dom::Element;
use crate::render::preview::PreviewBoard;

const STAR_PATH: &str = "M11.48 3.499a.562.562 0 0 1 1.04 0l2.125 5.111a.563.563 0 0 0 .475.345l5.518.442c.499.04.701.663.321.988l-4.204 3.602a.563.563 0 0 0-.182.557l1.285 5.385a.562.562 0 0 1-.84.61l-4.725-2.885a.562.562 0 0 0-.586 0L6.982 20.54a.562.562 0 0 1-.84-.61l1.285-5.386a.562.562 0 0 0-.182-.557l-4.204-3.602a.562.562 0 0 1 .321-.988l5.518-.442a.563.563 0 0 0 .475-.345L11.48 3.5Z";

/// 一张渲染好的视频卡片
#[derive(Debug, Clone)]
pub struct VideoCard {
    pub element: Element,
}

/// 卡片链接：观看模式按 slug 跳转，编辑模式按 id 跳转，其它模式生成空链接
pub fn video_href(video: &VideoRecord, link_mode: &LinkMode) -> String {
    match link_mode {
        LinkMode::Watch => format!("/view_video/{}/", video.video_slug),
        LinkMode::Edit => format!("/edit_video/{}/", video.video_id),
        LinkMode::Other(_) => String::new(),
    }
}

pub struct VideoCardBuilder<'a> {
    thumbnail: &'a str,
    previews: &'a PreviewBoard,
}

impl<'a> VideoCardBuilder<'a> {
    pub fn new(thumbnail: &'a str, previews: &'a PreviewBoard) -> Self {
        Self { thumbnail, previews }
    }

    /// 构建的卡片结构：
    ///
    /// ```text
    /// div.video-preview
    ///   a
    ///     video
    ///     div.video-title
    ///   div.video-info
    ///     span.video-username
    ///     span.video-views
    ///     span.video-stars
    /// ```
    pub fn build(&self, video: &VideoRecord, link_mode: &LinkMode) -> Result<VideoCard> {
        ensure!(
            !video.video_id.is_empty(),
            VideoEmError::InvalidVideo("video_id must not be empty".to_owned())
        );
        let href = video_href(video, link_mode);
        let preview_id = self.previews.register(href.clone());
        let preview = Element::new("video")
            .with_attr(
                "src",
                proxy_video_path(video.temp_link.as_deref().unwrap_or_default()),
            )
            .with_attr("muted", "")
            .with_attr("preload", "metadata")
            .with_attr("webkit-playsinline", "")
            .with_attr("x-webkit-airplay", "allow")
            .with_attr("poster", self.thumbnail);
        let link = Element::new("a")
            .with_attr("href", href.as_str())
            .with_attr("target", "_self")
            .with_child(preview)
            .with_child(
                Element::new("div")
                    .with_class("video-title")
                    .with_text(video.title.as_deref().unwrap_or_default()),
            );
        let info = Element::new("div")
            .with_class("video-info")
            .with_child(
                Element::new("span")
                    .with_class("video-username")
                    .with_text(video.username.as_str()),
            )
            .with_child(
                Element::new("span")
                    .with_class("video-views")
                    .with_text(format!("{} views", video.view_count)),
            )
            .with_child(
                Element::new("span")
                    .with_class("video-stars")
                    .with_text(video.stars.to_string())
                    .with_child(star_icon()),
            );
        let element = Element::new("div")
            .with_class("video-preview")
            .with_attr("data-preview-id", preview_id.to_string())
            .with_child(link)
            .with_child(info);
        Ok(VideoCard { element })
    }
}

fn star_icon() -> Element {
    Element::new("svg")
        .with_attr("xmlns", "http://www.w3.org/2000/svg")
        .with_attr("fill", "none")
        .with_attr("viewBox", "0 0 24 24")
        .with_attr("stroke-width", "1.5")
        .with_attr("stroke", "currentColor")
        .with_class("size-6")
        .with_child(
            Element::new("path")
                .with_attr("stroke-linecap", "round")
                .with_attr("stroke-linejoin", "round")
                .with_attr("d", STAR_PATH),
        )
}
