// src/cookies.rs
use axum::http::{header, HeaderMap};

pub const CART_SESSION: &str = "cart_session";
pub const ADMIN_AUTH: &str = "admin_auth";

/// Value of the named cookie from the request's `Cookie` headers.
pub fn read(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}

/// Client-readable cookie (no `HttpOnly`).
pub fn set(name: &str, value: &str, max_age_secs: u64) -> String {
    format!("{name}={value}; Path=/; Max-Age={max_age_secs}; SameSite=Lax")
}

pub fn expire(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn finds_cookie_among_several() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; cart_session=abc-123"));
        headers.append(header::COOKIE, HeaderValue::from_static("admin_auth=tok.en"));
        assert_eq!(read(&headers, CART_SESSION).as_deref(), Some("abc-123"));
        assert_eq!(read(&headers, ADMIN_AUTH).as_deref(), Some("tok.en"));
        assert_eq!(read(&headers, "missing"), None);
    }

    #[test]
    fn formats_set_cookie() {
        assert_eq!(set(ADMIN_AUTH, "t", 7200), "admin_auth=t; Path=/; Max-Age=7200; SameSite=Lax");
        assert!(expire(ADMIN_AUTH).contains("Max-Age=0"));
    }
}
