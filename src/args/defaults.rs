pub(crate) const DEFAULT_USER_AGENT: &str = concat!("boom/", env!("CARGO_PKG_VERSION"));

/// Config files picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["boom.toml", "boom.json"];
