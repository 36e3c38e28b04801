pub mod identity;
pub mod ports;
pub mod service;

pub use identity::Identity;
pub use identity::UserRecord;
pub use ports::UserLookup;
pub use service::extract_bearer;
pub use service::IdentityResolver;
