//! Bearer-token authentication.
//!
//! Access tokens are HS256 JWTs issued by [`jwt::make_jwt`]. Handlers take an
//! [`models::AuthUser`] argument to require a valid token.

pub mod extractor;
pub mod jwt;
pub mod models;

pub use extractor::get_bearer_token;
pub use jwt::{make_jwt, validate_jwt, JwtClaims};
pub use models::AuthUser;
