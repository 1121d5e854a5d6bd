pub mod controller;
pub mod error;
pub mod registry;
pub mod seed;

pub use controller::{CatalogController, CatalogSelection, Mode};
pub use error::CatalogError;
pub use registry::GameRegistry;
pub use seed::{Catalog, CatalogSeed, default_catalog};
