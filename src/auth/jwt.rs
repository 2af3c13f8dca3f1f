use axum::extract::FromRef;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{config::JwtConfig, state::AppState};

/// `kind` value the account service stamps on access tokens.
pub const ACCESS_KIND: &str = "access";

/// The claims this service checks. Anything else the account service puts in
/// its tokens is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: Uuid,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
    pub kind: String,
}

/// Verification side of the account service's tokens. Issuing them is not
/// this service's job.
#[derive(Clone)]
pub struct JwtKeys {
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig) -> Self {
        Self {
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
        }
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<AccessClaims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<AccessClaims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, kind = %data.claims.kind, "jwt verified");
        Ok(data.claims)
    }

    pub fn verify_access(&self, token: &str) -> anyhow::Result<AccessClaims> {
        let claims = self.verify(token)?;
        if !claims.kind.eq_ignore_ascii_case(ACCESS_KIND) {
            anyhow::bail!("not an access token: {}", claims.kind);
        }
        Ok(claims)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::sign;
    use super::*;

    fn cfg(secret: &str, issuer: &str, audience: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    #[test]
    fn verifies_access_token() {
        let cfg = cfg("dev-secret", "test-issuer", "test-aud");
        let user_id = Uuid::new_v4();
        let token = sign(&cfg, user_id, ACCESS_KIND);
        let claims = JwtKeys::new(&cfg).verify_access(&token).expect("verify token");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
    }

    #[test]
    fn refresh_token_is_not_accepted_as_access() {
        let cfg = cfg("dev-secret", "iss", "aud");
        let token = sign(&cfg, Uuid::new_v4(), "refresh");
        let err = JwtKeys::new(&cfg).verify_access(&token).unwrap_err();
        assert!(err.to_string().contains("not an access token"));
    }

    #[test]
    fn rejects_wrong_issuer_or_audience() {
        let good = cfg("same-secret", "good-iss", "good-aud");
        let bad = cfg("same-secret", "bad-iss", "bad-aud");
        let token = sign(&good, Uuid::new_v4(), ACCESS_KIND);
        assert!(JwtKeys::new(&bad).verify(&token).is_err());
    }

    #[test]
    fn rejects_foreign_secret() {
        let ours = cfg("ours", "iss", "aud");
        let theirs = cfg("theirs", "iss", "aud");
        let token = sign(&theirs, Uuid::new_v4(), ACCESS_KIND);
        assert!(JwtKeys::new(&ours).verify(&token).is_err());
    }
}
