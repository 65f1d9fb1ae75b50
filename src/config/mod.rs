pub mod mapping;
pub mod service;

pub use mapping::BrandMapping;
pub use service::ServiceConfig;

/// Debug mode stays on unless the flag is the literal `"0"`.
pub fn debug_enabled(flag: Option<&str>) -> bool {
    flag != Some("0")
}

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
