use http::HeaderMap;

pub const SESSION_COOKIE: &str = "twinklestar_session";

/// Build the Set-Cookie value for a fresh admin session.
pub fn session_cookie(token: &str, ttl_hours: i64, secure: bool) -> String {
    let max_age_secs = ttl_hours * 3600;
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the Set-Cookie value that expires the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
        SESSION_COOKIE
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Pull the session token out of the request's Cookie headers.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let mut split = cookie.splitn(2, '=');
            let key = split.next()?.trim();
            let val = split.next()?.trim();
            if key == SESSION_COOKIE {
                Some(val.to_string())
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn session_cookie_carries_ttl_and_flags() {
        let cookie = session_cookie("abc123", 24, false);
        assert_eq!(
            cookie,
            "twinklestar_session=abc123; HttpOnly; SameSite=Lax; Path=/; Max-Age=86400"
        );
    }

    #[test]
    fn secure_flag_is_appended_when_configured() {
        let cookie = session_cookie("abc123", 24, true);
        assert!(cookie.ends_with("; Secure"));
        assert!(clear_session_cookie(true).ends_with("; Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
    }

    #[test]
    fn finds_token_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            HeaderValue::from_static("theme=dark; twinklestar_session=tok42; lang=en"),
        );
        assert_eq!(session_token(&headers), Some("tok42".to_string()));
    }

    #[test]
    fn missing_cookie_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_token(&headers), None);
        assert_eq!(session_token(&HeaderMap::new()), None);
    }
}
