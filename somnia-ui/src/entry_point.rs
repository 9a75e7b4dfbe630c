//! Process-wide tracing setup for binaries built on somnia.
//!
//! ## Usage
//!
//! Call [`init_tracing`] once at startup. `RUST_LOG` wins over the default
//! directives.

/// Installs a `tracing-subscriber` fmt subscriber.
///
/// `default_directives` is used when `RUST_LOG` is unset or invalid, e.g.
/// `"error,somnia_components=info"`. Calling this more than once is harmless.
pub fn init_tracing(default_directives: &str) {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(default_directives) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}
