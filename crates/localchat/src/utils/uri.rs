/// Strips every trailing slash from a base URL.
///
/// # Examples
/// ```
/// use localchat::utils::uri::ensure_no_trailing_slash;
/// assert_eq!(ensure_no_trailing_slash("http://localhost:8000/v1/"), "http://localhost:8000/v1");
///
/// // Works with owned String too
/// let url = String::from("http://localhost:8000/v1//");
/// assert_eq!(ensure_no_trailing_slash(url), "http://localhost:8000/v1");
/// ```
pub fn ensure_no_trailing_slash<S>(url: S) -> String
where
    S: Into<String>,
{
    let mut url = url.into();
    let len = url.trim_end_matches('/').len();
    url.truncate(len);
    url
}

/// Ensures URL ends with exactly one trailing slash
///
/// # Examples
/// ```
/// use localchat::utils::uri::ensure_trailing_slash;
/// assert_eq!(ensure_trailing_slash("http://localhost:8000/v1"), "http://localhost:8000/v1/");
/// ```
pub fn ensure_trailing_slash<S>(url: S) -> String
where
    S: Into<String>,
{
    ensure_no_trailing_slash(url) + "/"
}

/// Joins a base URL and an endpoint path with exactly one slash between them.
pub fn join(base_url: &str, path: &str) -> String {
    ensure_trailing_slash(base_url) + path.trim_start_matches('/')
}
