use std::borrow::Cow;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "VideoEm", version = detail_version(), about, long_about = None)]
pub struct Args {
    #[arg(short, long, default_value = "None,videoem=info", env = "RUST_LOG")]
    pub log_level: String,

    #[arg(short, long, env = "VIDEOEM_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// 页面加载后模拟滚动到底部的次数，每次都会尝试加载下一页
    #[arg(short, long, default_value_t = 0)]
    pub scrolls: usize,

    /// 持续加载直到视频流没有更多数据，忽略 --scrolls
    #[arg(long)]
    pub all: bool,

    /// 页面加载后依次点击这些 data-preview-id 对应的视频卡片
    #[arg(long, value_delimiter = ',')]
    pub click: Vec<u64>,

    /// 在翻页之前先加载这个游标指向的一页，不影响视频流保存的游标
    #[arg(long)]
    pub cursor: Option<String>,

    #[command(subcommand)]
    pub page: PageArgs,
}

#[derive(Subcommand, Clone, Debug)]
pub enum PageArgs {
    /// 首页视频流
    Main,
    /// 个人主页，tab1 为我的视频，tab2 为观看历史
    Account {
        #[arg(long, default_value = "tab1")]
        tab: String,
        /// 页面加载后切换到另一个标签页
        #[arg(long)]
        switch_to: Option<String>,
    },
    /// 按关键词搜索
    Search {
        query: String,
        /// 搜索后点击标签搜索按钮
        #[arg(long)]
        to_tag_search: bool,
    },
    /// 按标签搜索，不传标签时只列出所有标签
    TagSearch {
        #[arg(value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// 订阅的作者发布的视频
    Subscriptions,
    /// 视频详情页
    View {
        video_id: String,
        #[arg(long)]
        author_id: i64,
        /// 切换订阅状态
        #[arg(long)]
        subscribe: bool,
        /// 请求打赏链接并交给宿主打开
        #[arg(long)]
        like: bool,
        /// 给视频加一颗星
        #[arg(long)]
        star: bool,
        /// 等待计入一次观看
        #[arg(long)]
        count_view: bool,
    },
    /// 在编辑页添加新标签
    AddTag { tag: String },
}

mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub fn version() -> Cow<'static, str> {
    if let (Some(git_version), Some(git_dirty)) = (built_info::GIT_VERSION, built_info::GIT_DIRTY) {
        Cow::Owned(format!("{}{}", git_version, if git_dirty { "-dirty" } else { "" }))
    } else {
        Cow::Borrowed(built_info::PKG_VERSION)
    }
}

fn detail_version() -> String {
    format!(
        "{}
Architecture: {}-{}
Author: {}
Built Time: {}
Rustc Version: {}",
        version(),
        built_info::CFG_OS,
        built_info::CFG_TARGET_ARCH,
        built_info::PKG_AUTHORS,
        built_info::BUILT_TIME_UTC,
        built_info::RUSTC_VERSION,
    )
}
