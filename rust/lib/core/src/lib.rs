//! Shared plumbing for roster service modules: the HTTP error type and the
//! module trait the server binary mounts.

pub mod error;
pub mod module;

pub use error::ServiceError;
pub use module::Module;
