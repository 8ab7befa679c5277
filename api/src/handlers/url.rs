//! Absolute URLs for stored asset paths

use actix_web::HttpRequest;

/// Expand a relative asset path into an absolute URL.
///
/// Absolute `http(s)` URLs (e.g. federated-login avatars) pass through.
/// Relative paths are joined to `public_base_url` when configured, otherwise
/// to the scheme and host of the incoming request.
pub fn construct_full_url(
    req: &HttpRequest,
    public_base_url: Option<&str>,
    path: Option<&str>,
) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;

    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }

    let separator = if path.starts_with('/') { "" } else { "/" };
    let base = match public_base_url {
        Some(base) => base.trim_end_matches('/').to_string(),
        None => {
            let info = req.connection_info();
            format!("{}://{}", info.scheme(), info.host())
        }
    };

    Some(format!("{}{}{}", base, separator, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_relative_path_uses_request_host() {
        let req = TestRequest::default()
            .insert_header(("host", "api.muzalife.com"))
            .to_http_request();
        assert_eq!(
            construct_full_url(&req, None, Some("/uploads/profiles/a.png")).as_deref(),
            Some("http://api.muzalife.com/uploads/profiles/a.png")
        );
    }

    #[test]
    fn test_configured_base_wins() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(
            construct_full_url(&req, Some("https://cdn.muzalife.com/"), Some("uploads/a.png")).as_deref(),
            Some("https://cdn.muzalife.com/uploads/a.png")
        );
    }

    #[test]
    fn test_absolute_and_missing_paths() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(
            construct_full_url(&req, None, Some("https://lh3.example.com/p.jpg")).as_deref(),
            Some("https://lh3.example.com/p.jpg")
        );
        assert_eq!(construct_full_url(&req, None, None), None);
        assert_eq!(construct_full_url(&req, None, Some("")), None);
    }
}
