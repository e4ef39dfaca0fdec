// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cookie policy.
//!
//! Issue and removal cookies share every attribute except value and
//! lifetime, otherwise browsers treat them as different cookies.

use crate::config::Config;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// `SameSite=None` is only accepted by browsers alongside `Secure`.
fn same_site(secure: bool) -> SameSite {
    if secure {
        SameSite::None
    } else {
        SameSite::Lax
    }
}

fn base_cookie(config: &Config, value: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), value))
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(same_site(config.secure_cookies))
        .path("/")
        .build()
}

/// Cookie carrying a session credential.
///
/// `max_age_secs` is the provider's `expires_in`, not the shorter
/// credential lifetime.
pub fn session_cookie(config: &Config, credential: String, max_age_secs: u64) -> Cookie<'static> {
    let mut cookie = base_cookie(config, credential);
    cookie.set_max_age(Duration::seconds(
        i64::try_from(max_age_secs).unwrap_or(i64::MAX),
    ));
    cookie
}

/// Removal cookie for logout.
pub fn clear_session_cookie(config: &Config) -> Cookie<'static> {
    let mut cookie = base_cookie(config, String::new());
    cookie.set_max_age(Duration::ZERO);
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_local() {
        let config = Config::default();
        let rendered = session_cookie(&config, "cred".to_string(), 3600).to_string();

        assert!(rendered.starts_with("sp_session=cred"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=3600"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn test_session_cookie_tls() {
        let config = Config {
            secure_cookies: true,
            ..Config::default()
        };
        let rendered = session_cookie(&config, "cred".to_string(), 60).to_string();

        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("SameSite=None"));
    }

    #[test]
    fn test_clear_cookie_matches_attributes() {
        let config = Config::default();
        let rendered = clear_session_cookie(&config).to_string();

        assert!(rendered.starts_with("sp_session="));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=0"));
    }
}
