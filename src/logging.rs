use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a stderr subscriber for the crate's tracing events.
///
/// Defaults to `warn` unless overridden by `VMDROP_LOG`. Returns `false` when
/// a global subscriber was already installed, in which case nothing changes.
pub fn init() -> bool {
    let filter = EnvFilter::builder()
        .with_env_var("VMDROP_LOG")
        .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        assert!(!init());
    }
}
