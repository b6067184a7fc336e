// Application layer - account use cases and startup seeding.
// Owns no state beyond the repository handle, so it is safe to share
// across concurrent requests.

pub mod error;
pub mod seed;
pub mod service;

pub use error::*;
pub use service::*;
