//! 前端工具依赖的通用组件: 日志初始化与环境配置.

use log::LevelFilter;

pub mod loader;

const SEP: &str = "--------------------------------------------------------";

/// 简单分隔线.
#[inline]
pub fn sep() {
    println!("{SEP}");
}

/// 初始化日志.
///
/// 默认级别为 `Info`; 若设置了 `$RUST_LOG` (如 `debug`), 则以其为准.
/// 重复初始化时什么也不做.
pub fn init_logger() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    let _ = simple_logger::SimpleLogger::new()
        .with_level(level)
        .init();
}
