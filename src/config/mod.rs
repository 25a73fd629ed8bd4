//! Configuration and path management for fluxo

pub mod paths;
pub mod settings;

pub use paths::FluxoPaths;
pub use settings::Settings;
