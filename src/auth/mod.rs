//! Bearer token verification. Accounts, passwords and token issuance live in
//! the account service; this crate only trusts its signed access tokens.

pub(crate) mod extractors;
pub mod jwt;

pub use extractors::AuthUser;
pub use jwt::JwtKeys;
