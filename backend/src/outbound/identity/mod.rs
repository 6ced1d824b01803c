//! Identity adapters implementing [`crate::domain::ports::IdentityVerifier`].

mod jwt;

pub use jwt::{JwtClaims, JwtIdentityVerifier};
