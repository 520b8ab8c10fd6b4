// Public API exports
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod prettyprint;

// Re-export key types for easy access
pub use domain::*;
pub use ports::*;
