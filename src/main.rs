use particle_field::{run, EngineConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,wgpu=warn,naga=warn")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(EngineConfig::default()) {
        tracing::error!("particle field failed: {}", e);
        std::process::exit(1);
    }
}
