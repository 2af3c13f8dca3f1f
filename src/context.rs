use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{header::ACCEPT_LANGUAGE, request::Parts, StatusCode},
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::AuthUser, config::LocaleConfig, state::AppState};

fn is_language_tag(tag: &str) -> bool {
    lazy_static! {
        static ref TAG_RE: Regex = Regex::new(r"^[A-Za-z]{2,3}([-_][A-Za-z0-9]{2,8})*$").unwrap();
    }
    TAG_RE.is_match(tag)
}

/// Locale the catalog names are resolved in, plus the fallback used when a
/// food has no translation for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub requested: String,
    pub fallback: String,
}

impl Locale {
    /// Picks `?lang=` first, then the first `Accept-Language` entry, then the
    /// configured default. Malformed or unsupported tags are skipped.
    pub fn negotiate(cfg: &LocaleConfig, query: Option<&str>, accept: Option<&str>) -> Self {
        let from_header = accept.and_then(|h| h.split(',').next()).map(|t| {
            t.split(';').next().unwrap_or_default().trim()
        });
        let requested = [query.map(str::trim), from_header]
            .into_iter()
            .flatten()
            .filter(|t| is_language_tag(t))
            .find_map(|t| cfg.resolve(t))
            .unwrap_or(cfg.default.as_str())
            .to_string();
        Self {
            requested,
            fallback: cfg.default.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for Locale {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let lang = Query::<LangQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.lang);
        let accept = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());
        Ok(Self::negotiate(&state.config.locales, lang.as_deref(), accept))
    }
}

/// Everything a diversity call needs to know about the caller. Built per
/// request and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub locale: Locale,
}

impl RequestContext {
    pub fn new(user_id: Uuid, locale: Locale) -> Self {
        Self { user_id, locale }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user_id) = AuthUser::from_request_parts(parts, state).await?;
        let locale = Locale::from_request_parts(parts, state).await?;
        Ok(Self { user_id, locale })
    }
}
