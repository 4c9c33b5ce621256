use tracing_subscriber::EnvFilter;

/// The default filter for a verbosity count, falling back to `configured`
/// when no `-v` flag was given.
pub fn level_for(verbosity: u8, configured: &str) -> &str {
    match verbosity {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over
/// `default_level`. Output goes to stderr so stdout carries only results.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_overrides_configured_level() {
        assert_eq!(level_for(0, "error"), "error");
        assert_eq!(level_for(1, "error"), "info");
        assert_eq!(level_for(2, "error"), "debug");
        assert_eq!(level_for(5, "error"), "trace");
    }
}
