use crate::cli::LogLevel;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Install the global subscriber
///
/// Logs go to stderr without color codes; stdout carries the protocol.
/// `RUST_LOG`, when set, replaces the level-derived filter.
pub fn configure_logging(level: LogLevel) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;
    Ok(())
}

fn default_directives(level: LogLevel) -> String {
    format!("rmcp=warn,{}", level.as_directive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rmcp_is_quieted() {
        assert_eq!(default_directives(LogLevel::Debug), "rmcp=warn,debug");
        assert_eq!(default_directives(LogLevel::Error), "rmcp=warn,error");
    }
}
