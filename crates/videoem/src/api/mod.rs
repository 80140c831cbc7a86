pub use client::Client;
pub(crate) use client::Validate;
pub use feed::FeedQuery;
pub use subscription::SubscriptionAction;

mod client;
mod feed;
mod invoice;
mod subscription;
mod tag;
mod user;
mod video;

#[cfg(test)]
pub(crate) use feed::parse_feed_page;

/// 视频预览统一走站内代理，真实的存储地址不出现在页面中
pub fn proxy_video_path(temp_link: &str) -> String {
    format!(
        "/proxy-video/?{}",
        serde_urlencoded::to_string([("video_url", temp_link)]).unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_video_path() {
        assert_eq!(
            proxy_video_path("https://cdn.example/file.mp4?token=a&b=c"),
            "/proxy-video/?video_url=https%3A%2F%2Fcdn.example%2Ffile.mp4%3Ftoken%3Da%26b%3Dc"
        );
        assert_eq!(proxy_video_path(""), "/proxy-video/?video_url=");
    }
}
