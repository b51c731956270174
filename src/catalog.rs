//! Track catalog: categories of ambient tracks the player can offer.
//!
//! The bundled catalog lives in `catalog::builtin`; a TOML file can replace
//! it (see `Catalog::load`).

mod builtin;
mod load;
mod model;

pub use load::CatalogError;
pub use model::*;

#[cfg(test)]
mod tests;
