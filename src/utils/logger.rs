use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the stderr log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Compact,
    /// JSON lines, for hosts that ship logs to a collector
    Json,
}

/// Filter used when `RUST_LOG` is not set; stdout only ever carries results.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "bdea_client=debug,bdea=debug,warn"
    } else {
        "bdea_client=warn"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    match format {
        LogFormat::Compact => init_cli_logger(verbose),
        LogFormat::Json => init_json_logger(verbose),
    }
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(false), "bdea_client=warn");
        assert!(default_directives(true).contains("bdea_client=debug"));
        assert_eq!(LogFormat::default(), LogFormat::Compact);
    }

    // 全域 subscriber 只能安裝一次，整個測試執行檔只有這裡呼叫
    #[test]
    fn test_json_logger_installs() {
        init_logger(LogFormat::Json, true);
        tracing::debug!(key = %"xxxxxxxx3456", "json logger ready");
        let installed = tracing::dispatcher::get_default(|dispatch| {
            !dispatch.is::<tracing::subscriber::NoSubscriber>()
        });
        assert!(installed);
    }
}
