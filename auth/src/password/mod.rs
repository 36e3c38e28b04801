pub mod errors;
pub mod hasher;
pub mod strength;

pub use errors::PasswordError;
pub use hasher::PasswordHasher;
pub use strength::PasswordPolicy;
