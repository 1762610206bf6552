//! Configuration types module

pub mod app;
pub mod application;
pub mod logging;

// Re-export main types
pub use app::AppConfig;
pub use application::ApplicationConfig;
pub use logging::LoggingConfig;
