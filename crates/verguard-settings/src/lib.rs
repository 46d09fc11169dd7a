//! Configuration: `verguard.toml` parsing and CLI override resolution.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{PolicyCoordinates, VerguardConfigV1};
pub use resolve::{
    parse_config_toml, resolve_config, Overrides, PolicySource, ResolvedConfig,
    DEFAULT_TIMEOUT_SECS,
};
