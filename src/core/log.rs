use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Level of this crate's own events for a `-v` count: warnings by default,
/// `-v` for progress messages and `-vv` for store and calculation detail.
pub fn app_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

/// Filter used when `RUST_LOG` is unset. Dependencies stay silent.
fn default_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::default()
        .add_directive(LevelFilter::OFF.into())
        .add_directive(
            format!("nestegg={}", app_level(verbosity))
                .parse()
                .unwrap_or_else(|_| LevelFilter::WARN.into()),
        )
}

/// Installs the global subscriber, writing to stderr so command output on
/// stdout stays clean. A set `RUST_LOG` replaces the verbosity-based filter.
pub fn init_logging(verbosity: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbosity));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
