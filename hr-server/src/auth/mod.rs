//! Authentication and authorization
//!
//! - [`JwtService`] - token issuing and validation
//! - [`CurrentUser`] - the resolved caller
//! - [`Capability`] - the role policy table
//! - [`require_auth`] / [`require_capability`] - middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod policy;

pub use extractor::CurrentUser;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_capability};
pub use password::{generate_temporary_password, hash_password, verify_password};
pub use policy::Capability;
