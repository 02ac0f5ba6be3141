// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 未设置 RUST_LOG 时的过滤器：依赖库只输出告警，本库输出 info
pub const DEFAULT_FILTER: &str = "warn,sales_dao=info";

/// 测试环境过滤器：本库输出到 debug（含每条语句的 DAO 日志）
pub const TEST_FILTER: &str = "warn,sales_dao=debug";

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: `DEFAULT_FILTER`）
///   例如: RUST_LOG=debug 或 RUST_LOG=sales_dao=trace
///
/// # 示例
/// ```no_run
/// use sales_dao::logging;
/// logging::init();
/// ```
pub fn init() {
    fmt()
        .with_env_filter(default_filter())
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// 以 JSON 行格式初始化日志（便于采集）
pub fn init_json() {
    fmt()
        .json()
        .with_env_filter(default_filter())
        .with_target(true)
        .init();
}

/// 初始化测试环境的日志系统
///
/// 本库日志开到 debug，依赖库保持 warn；可重复调用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new(TEST_FILTER))
        .with_test_writer()
        .try_init();
}
