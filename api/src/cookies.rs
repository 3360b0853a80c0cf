//! The `refresh_token` cookie

use actix_web::cookie::{time::OffsetDateTime, Cookie, SameSite};
use actix_web::HttpRequest;
use dt_core::domain::entities::IssuedRefreshToken;
use dt_shared::config::SessionConfig;

fn same_site(config: &SessionConfig) -> SameSite {
    match config.same_site.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}

fn base_cookie(config: &SessionConfig, value: String) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), value)
        .path(config.cookie_path.clone())
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(same_site(config))
        .finish()
}

/// Cookie delivering a freshly issued refresh token, expiring with it
pub fn refresh_cookie(config: &SessionConfig, token: &IssuedRefreshToken) -> Cookie<'static> {
    let mut cookie = base_cookie(config, token.plaintext().to_string());
    if let Ok(expires) = OffsetDateTime::from_unix_timestamp(token.expires_at.timestamp()) {
        cookie.set_expires(expires);
    }
    cookie
}

/// Cookie instructing the client to drop its refresh token
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = base_cookie(config, String::new());
    cookie.make_removal();
    cookie
}

/// The refresh token sent by the client, if any
pub fn read_refresh_cookie(req: &HttpRequest, config: &SessionConfig) -> Option<String> {
    req.cookie(&config.cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dt_shared::config::Environment;

    #[test]
    fn test_removal_cookie_keeps_attributes() {
        let config = SessionConfig::for_environment(Environment::Production);
        let cookie = removal_cookie(&config);

        assert_eq!(cookie.name(), "refresh_token");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_same_site_parsing() {
        let mut config = SessionConfig::default();
        assert_eq!(same_site(&config), SameSite::Lax);

        config.same_site = "Strict".to_string();
        assert_eq!(same_site(&config), SameSite::Strict);

        config.same_site = "bogus".to_string();
        assert_eq!(same_site(&config), SameSite::Lax);
    }
}
