//! Session cookie helpers and token extraction.

use axum::http::{
    header::{InvalidHeaderValue, AUTHORIZATION, COOKIE},
    HeaderMap, HeaderValue,
};

pub const SESSION_COOKIE_NAME: &str = "jwt";
pub const SESSION_COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 7;

/// `HttpOnly`, `Secure` cookie carrying the session token for seven days.
pub fn session_cookie(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; Secure; Max-Age={SESSION_COOKIE_MAX_AGE_SECS}"
    ))
}

/// Expires the session cookie immediately.
pub fn clear_session_cookie() -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; Secure; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT"
    ))
}

/// The `jwt` cookie wins; a `Bearer` authorization header is the fallback.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie_token(headers).or_else(|| extract_bearer_token(headers))
}

fn extract_cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == SESSION_COOKIE_NAME)
        .map(|(_, val)| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.trim().strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(axum::http::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("abc.def.ghi").unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("jwt=abc.def.ghi;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=604800"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie().unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("jwt=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn reads_cookie_among_others() {
        let h = headers(&[(COOKIE, "theme=dark; jwt=tok123; lang=en")]);
        assert_eq!(extract_token(&h).as_deref(), Some("tok123"));
    }

    #[test]
    fn falls_back_to_bearer() {
        let h = headers(&[(AUTHORIZATION, "Bearer tok456")]);
        assert_eq!(extract_token(&h).as_deref(), Some("tok456"));
    }

    #[test]
    fn cookie_wins_over_bearer() {
        let h = headers(&[(COOKIE, "jwt=from-cookie"), (AUTHORIZATION, "Bearer from-header")]);
        assert_eq!(extract_token(&h).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn empty_cookie_falls_back_to_bearer() {
        let h = headers(&[(COOKIE, "jwt="), (AUTHORIZATION, "Bearer from-header")]);
        assert_eq!(extract_token(&h).as_deref(), Some("from-header"));
    }

    #[test]
    fn missing_or_wrong_scheme_yields_none() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
        assert_eq!(extract_token(&headers(&[(AUTHORIZATION, "Basic Zm9vOmJhcg==")])), None);
        assert_eq!(extract_token(&headers(&[(AUTHORIZATION, "Bearer ")])), None);
        assert_eq!(extract_token(&headers(&[(COOKIE, "jwtx=nope")])), None);
    }
}
