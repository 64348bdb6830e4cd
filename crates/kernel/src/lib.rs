//! Core traits, settings, request validation, and the module registry.

pub mod module;
pub mod registry;
pub mod settings;
pub mod validation;

pub use module::{InitCtx, Module, SchemaDef};
pub use registry::ModuleRegistry;
