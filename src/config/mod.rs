//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::MoneyTrackPaths;
pub use settings::Settings;
