use env_logger::{Builder, Env};

// wgpu ist auf info sehr gesprächig
const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Globalen Logger starten; Filter über `RUST_LOG` überschreibbar.
pub fn init() {
    let env = Env::default().default_filter_or(DEFAULT_FILTER);
    let mut builder = Builder::from_env(env);

    // schlägt nur fehl, wenn schon ein Logger gesetzt ist
    let _ = builder.try_init();
}
