//! 日志初始化，输出到stderr，避免与生成结果混在一起

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// `RUST_LOG` 优先；否则默认 info，`--verbose` 时本crate提升到 debug
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "postcraft_rs=debug,postcraft=debug,info"
    } else {
        "info"
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let stderr_log = fmt::layer()
        .compact()
        .with_target(verbose)
        .with_writer(std::io::stderr);

    // 重复初始化（例如测试中）直接忽略
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_log)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(false), "info");
        assert!(default_directives(true).starts_with("postcraft_rs=debug"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
