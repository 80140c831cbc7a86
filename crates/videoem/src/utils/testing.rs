use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::Query;
use axum::routing::get;
use axum::Json;
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::api::Client;
use crate::config::Settings;
use crate::host::StaticWebApp;
use crate::page::PageContext;
use crate::render::{Document, Element};

pub const TEST_USER_ID: i64 = 42;

/// 启动一个只监听本地随机端口的测试服务，返回它的地址
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// 记录测试服务收到的每一次请求的查询参数
#[derive(Clone, Default)]
pub struct Hits(Arc<Mutex<Vec<HashMap<String, String>>>>);

impl Hits {
    pub fn record(&self, params: HashMap<String, String>) {
        self.0.lock().push(params);
    }

    pub fn count(&self) -> usize {
        self.0.lock().len()
    }

    pub fn all(&self) -> Vec<HashMap<String, String>> {
        self.0.lock().clone()
    }
}

pub fn video_json(slug: &str) -> Value {
    json!({
        "video_id": format!("id-{slug}"),
        "video_slug": slug,
        "title": format!("Video {slug}"),
        "temp_link": format!("https://cdn.example/{slug}.mp4"),
        "view_count": 1,
        "stars": 0,
        "username": "Alice",
    })
}

/// 一个共 `pages` 页的游标分页接口：前面每页两个视频，最后一页为空
pub fn feed_router(path: &str, hits: Hits, pages: usize) -> Router {
    let next_path = path.to_owned();
    Router::new().route(
        path,
        get(move |Query(params): Query<HashMap<String, String>>| {
            let (hits, path) = (hits.clone(), next_path.clone());
            async move {
                let page = params.get("cursor").and_then(|c| c.parse::<usize>().ok()).unwrap_or(1);
                hits.record(params);
                if page >= pages {
                    return Json(json!({"results": [], "next": null}));
                }
                Json(json!({
                    "results": [video_json(&format!("{page}a")), video_json(&format!("{page}b"))],
                    "next": format!("{path}?cursor={}", page + 1),
                }))
            }
        }),
    )
}

pub fn test_settings() -> Settings {
    Settings {
        csrf_token: "csrf-token".to_owned(),
        thumbnail: "/static/thumb.jpg".to_owned(),
        scroll_throttle: std::time::Duration::from_millis(20),
        preview_duration: std::time::Duration::from_millis(100),
        view_delay: std::time::Duration::from_millis(20),
    }
}

pub fn test_host() -> Arc<StaticWebApp> {
    Arc::new(StaticWebApp::new(Some(videoem_model::WebAppUser {
        id: Some(TEST_USER_ID),
        username: Some("alice".to_owned()),
        photo_url: Some("https://t.me/i/alice.jpg".to_owned()),
    })))
}

pub fn test_context(base: &str, layout: Vec<Element>) -> PageContext {
    test_context_with_host(base, layout, test_host())
}

pub fn test_context_with_host(base: &str, layout: Vec<Element>, host: Arc<StaticWebApp>) -> PageContext {
    let settings = test_settings();
    PageContext::new(
        Client::new(base, settings.csrf_token.clone()).unwrap(),
        Document::new(layout),
        host,
        settings,
    )
}
