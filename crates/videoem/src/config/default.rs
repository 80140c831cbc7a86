pub(super) fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_owned()
}

pub(super) fn default_thumbnail() -> String {
    "/static/video_app/images/thumbnail.jpg".to_owned()
}

pub(super) fn default_scroll_throttle_ms() -> u64 {
    400
}

pub(super) fn default_preview_duration_ms() -> u64 {
    5000
}

pub(super) fn default_view_delay_secs() -> u64 {
    60
}
