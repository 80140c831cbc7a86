use std::path::PathBuf;

use clap::Parser;
use once_cell::sync::Lazy;

use crate::config::Config;
use crate::config::args::Args;

/// 全局的 ARGS，用来解析命令行参数
pub static ARGS: Lazy<Args> = Lazy::new(Args::parse);

/// 全局的 CONFIG_DIR，命令行参数优先，否则使用系统配置目录
pub static CONFIG_DIR: Lazy<PathBuf> = Lazy::new(|| {
    ARGS.config_dir
        .clone()
        .unwrap_or_else(|| dirs::config_dir().expect("No config path found").join("videoem"))
});

/// 全局的 CONFIG，可以从中读取配置信息
pub static CONFIG: Lazy<Config> = Lazy::new(load_config);

fn load_config() -> Config {
    info!("开始加载配置文件..");
    let config = Config::load().unwrap_or_else(|err| {
        if err
            .downcast_ref::<std::io::Error>()
            .is_none_or(|e| e.kind() != std::io::ErrorKind::NotFound)
        {
            panic!("加载配置文件失败，错误为： {err}");
        }
        warn!("配置文件不存在，使用默认配置..");
        Config::default()
    });
    info!("配置文件加载完毕，覆盖刷新原有配置");
    config.save().expect("保存默认配置时遇到错误");
    info!("检查配置文件..");
    if let Err(e) = config.check() {
        panic!("{e}");
    }
    info!("配置文件检查通过");
    config
}
