pub mod error;
pub mod phpdoc_param;
pub mod registry;
pub mod traits;

pub use registry::default_registry;
