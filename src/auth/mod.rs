pub mod middleware;
pub mod password;
pub mod token;

pub use middleware::{validate_token, AuthenticatedUser};
