use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for a CLI run.
///
/// Defaults to warnings only so normal runs stay quiet; `verbose` raises the
/// crate's own logs to debug. `RUST_LOG` wins when set. Output goes to
/// stderr, keeping stdout clean.
///
/// # Errors
/// Returns error if the subscriber is already initialized.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default_filter = if verbose { "smartvol=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}
