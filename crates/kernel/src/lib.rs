//! Kernel of the bookshelf service: layered settings, the [`Module`] trait
//! every feature implements, and the [`ModuleRegistry`] driving their lifecycle.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
pub use settings::Settings;
