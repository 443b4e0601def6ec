pub mod agent;
pub mod clock;
pub mod concept;
pub mod config;
pub mod conversation;
pub mod error;
pub mod note;
pub mod persona;
pub mod prompt;
pub mod repository;
pub mod response;
pub mod state;

// Re-export common error type
pub use error::SophiError;
