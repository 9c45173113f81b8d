// 日志系统 - 服务端结构化日志
// 开发心理：机制层只依赖log门面，初始化时接上env_logger，级别可由配置覆盖
// 设计原则：幂等初始化、RUST_LOG优先、格式紧凑

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

// 解析配置中的日志级别字符串
fn parse_level(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

// 初始化日志系统（可重复调用，后续调用为空操作）
//
// RUST_LOG 环境变量优先于配置级别。
pub fn init(level: &str) {
    let mut builder = Builder::new();

    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    } else {
        builder.filter_level(parse_level(level));
    }

    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .ok();
}
