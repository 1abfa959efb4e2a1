//! Minimal `Cookie` / `Set-Cookie` handling for the two cookies this service owns.

/// Find a cookie value in a `Cookie` request header (`a=1; b=2`).
pub fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Build a `Set-Cookie` value. Always `Path=/; HttpOnly; SameSite=Lax`.
pub fn set_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{name}={value}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// A `Set-Cookie` value that makes the browser drop the cookie immediately.
pub fn expire_cookie(name: &str, secure: bool) -> String {
    set_cookie(name, "", 0, secure)
}
