use std::time::Duration;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use videoem_model::WebAppUser;

mod args;
mod default;
mod global;

pub use crate::config::args::{PageArgs, version};
use crate::config::default::*;
pub use crate::config::global::{ARGS, CONFIG, CONFIG_DIR};

#[derive(Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 页面中内嵌的 CSRF token，所有修改类请求都需要携带
    #[serde(default)]
    pub csrf_token: String,
    /// 模拟宿主 WebApp 注入的 initDataUnsafe.user
    #[serde(default)]
    pub user: WebAppUser,
    #[serde(default = "default_thumbnail")]
    pub thumbnail: String,
    #[serde(default = "default_scroll_throttle_ms")]
    pub scroll_throttle_ms: u64,
    #[serde(default = "default_preview_duration_ms")]
    pub preview_duration_ms: u64,
    #[serde(default = "default_view_delay_secs")]
    pub view_delay_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            csrf_token: String::new(),
            user: WebAppUser::default(),
            thumbnail: default_thumbnail(),
            scroll_throttle_ms: default_scroll_throttle_ms(),
            preview_duration_ms: default_preview_duration_ms(),
            view_delay_secs: default_view_delay_secs(),
        }
    }
}

impl Config {
    pub fn save(&self) -> Result<()> {
        let config_path = CONFIG_DIR.join("config.toml");
        std::fs::create_dir_all(&*CONFIG_DIR)?;
        std::fs::write(config_path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    fn load() -> Result<Self> {
        let config_path = CONFIG_DIR.join("config.toml");
        let config_content = std::fs::read_to_string(config_path)?;
        Ok(toml::from_str(&config_content)?)
    }

    pub fn check(&self) -> Result<()> {
        let mut ok = true;
        if let Err(e) = reqwest::Url::parse(&self.base_url) {
            ok = false;
            error!("base_url '{}' is not a valid url: {}", self.base_url, e);
        }
        if self.user.id.is_none() {
            // 首页和搜索页不依赖当前用户
            warn!("user.id is not set, pages that depend on the current user will not work");
        }
        if self.csrf_token.is_empty() {
            // 只读页面不需要 token，仅提示
            warn!("csrf_token is empty, mutating requests will be rejected by the server");
        }
        if self.scroll_throttle_ms == 0 {
            ok = false;
            error!("scroll_throttle_ms must be greater than 0");
        }
        if !ok {
            bail!(
                "config file at {} is invalid, fix it according to the messages above",
                CONFIG_DIR.join("config.toml").display()
            );
        }
        Ok(())
    }
}

/// 页面运行时使用的参数，由配置文件派生
#[derive(Debug, Clone)]
pub struct Settings {
    pub csrf_token: String,
    pub thumbnail: String,
    pub scroll_throttle: Duration,
    pub preview_duration: Duration,
    pub view_delay: Duration,
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            csrf_token: config.csrf_token.clone(),
            thumbnail: config.thumbnail.clone(),
            scroll_throttle: Duration::from_millis(config.scroll_throttle_ms),
            preview_duration: Duration::from_millis(config.preview_duration_ms),
            view_delay: Duration::from_secs(config.view_delay_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config: Config = toml::from_str(
            r#"
            base_url = "http://127.0.0.1:8000"

            [user]
            id = 42
            username = "alice"
            "#,
        )
        .unwrap();
        assert_eq!(config.scroll_throttle_ms, 400);
        assert_eq!(config.preview_duration_ms, 5000);
        assert_eq!(config.view_delay_secs, 60);
        assert_eq!(config.thumbnail, "/static/video_app/images/thumbnail.jpg");
        assert_eq!(config.user.id, Some(42));
        assert_eq!(config.user.photo_url, None);
        let settings = Settings::from(&config);
        assert_eq!(settings.scroll_throttle, Duration::from_millis(400));
        assert_eq!(settings.view_delay, Duration::from_secs(60));
    }
}
