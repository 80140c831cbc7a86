use tracing_subscriber::util::SubscriberInitExt;

#[cfg(test)]
pub mod testing;

pub fn init_logger(log_level: &str) {
    tracing_subscriber::fmt::Subscriber::builder()
        .compact()
        .with_env_filter(tracing_subscriber::EnvFilter::builder().parse_lossy(log_level))
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(
            "%b %d %H:%M:%S".to_owned(),
        ))
        // 标准输出留给渲染结果
        .with_writer(std::io::stderr)
        .finish()
        .try_init()
        .expect("初始化日志失败");
}
