pub mod config;
pub mod error;
pub mod models;
pub mod dispatch; // Typed (entity, event) handler table
pub mod forms; // Form view-model + per-entity handlers
pub mod remote; // Outbound calls, inbound push events
pub mod chat; // Consultation transcript rendering
pub mod medications; // Stock depletion + schedule rules
pub mod consultation; // Consultation lifecycle
pub mod providers; // Provider contact + schedule rules
pub mod prescriptions; // Prescription quantity + age

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter. A second call (or a host that already installed one) is a no-op.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} core v{}", config::APP_NAME, config::APP_VERSION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
