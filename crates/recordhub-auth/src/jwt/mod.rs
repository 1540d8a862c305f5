//! Session token encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::SessionClaims;
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder};

/// Issuer stamped into, and required on, every session token.
pub const ISSUER: &str = "recordhub";
