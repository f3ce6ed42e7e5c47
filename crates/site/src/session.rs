//! Preview-mode cookies.
//!
//! Entering preview mode sets two cookies: a random bypass id that marks the
//! browser as previewing, and a signed token carrying the [`PreviewData`].
//! Both must be present for a request to be served in preview mode.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use spacetraveling_core::PreviewData;
use uuid::Uuid;

use crate::error::SiteError;

pub const BYPASS_COOKIE: &str = "__prerender_bypass";
pub const PREVIEW_DATA_COOKIE: &str = "__preview_data";

#[derive(Debug, Serialize, Deserialize)]
struct PreviewClaims {
    #[serde(flatten)]
    data: PreviewData,
    exp: i64,
}

/// Signs, reads and clears preview cookies.
#[derive(Clone)]
pub struct PreviewSession {
    encoding: EncodingKey,
    decoding: DecodingKey,
    max_age_secs: u64,
    secure: bool,
}

impl PreviewSession {
    pub fn new(secret: &str, max_age_secs: u64, secure: bool) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            max_age_secs,
            secure,
        }
    }

    pub fn sign(&self, data: &PreviewData) -> Result<String, SiteError> {
        let max_age = i64::try_from(self.max_age_secs).unwrap_or(i64::MAX);
        let claims = PreviewClaims {
            data: data.clone(),
            exp: Utc::now().timestamp().saturating_add(max_age),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| SiteError::Internal(format!("failed to sign preview data: {e}")))
    }

    /// Decode a signed preview token; `None` if tampered with or expired.
    pub fn verify(&self, token: &str) -> Option<PreviewData> {
        let validation = Validation::new(Algorithm::HS256);
        match decode::<PreviewClaims>(token, &self.decoding, &validation) {
            Ok(decoded) => Some(decoded.claims.data),
            Err(e) => {
                tracing::debug!(error = %e, "rejecting preview cookie");
                None
            }
        }
    }

    /// Preview data for this request, if the browser is in preview mode.
    pub fn read(&self, jar: &CookieJar) -> Option<PreviewData> {
        jar.get(BYPASS_COOKIE)?;
        self.verify(jar.get(PREVIEW_DATA_COOKIE)?.value())
    }

    /// Add the preview cookies for `data` to `jar`.
    pub fn enable(&self, jar: CookieJar, data: &PreviewData) -> Result<CookieJar, SiteError> {
        let token = self.sign(data)?;
        let bypass = Uuid::new_v4().to_string();
        Ok(jar
            .add(self.cookie(BYPASS_COOKIE, bypass))
            .add(self.cookie(PREVIEW_DATA_COOKIE, token)))
    }

    /// Remove both preview cookies from `jar`.
    pub fn disable(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(BYPASS_COOKIE).path("/"))
            .remove(Cookie::build(PREVIEW_DATA_COOKIE).path("/"))
    }

    fn cookie(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }
}
