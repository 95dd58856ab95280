//! Infrastructure configuration modules.

pub mod logging;
pub mod pricing;
pub mod retry;
pub mod settings;

pub use settings::Config;
