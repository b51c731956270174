//! Settings for lull: schema types and the loader that layers the TOML
//! file and `LULL__*` environment overrides on top of the defaults.

mod load;
mod schema;

pub use load::default_log_path;
pub use schema::*;

#[cfg(test)]
mod tests;
