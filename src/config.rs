#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Same origin in production
}

const FORM_PATH: &str = "/api/cv";

/// Target of the lead-capture form POST.
///
/// Release builds post to `/api/cv` on the page's own origin. Debug builds
/// post cross-origin to the local backend on `http://localhost:3001`, which
/// must allow CORS from the dev server.
pub fn form_endpoint() -> String {
    format!("{}{}", get_backend_url(), FORM_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_endpoint_ends_with_form_path() {
        let endpoint = form_endpoint();
        assert!(endpoint.ends_with("/api/cv"));
        assert!(endpoint.starts_with(get_backend_url()));
    }

    #[test]
    fn debug_builds_target_local_backend() {
        if cfg!(debug_assertions) {
            assert_eq!(form_endpoint(), "http://localhost:3001/api/cv");
        } else {
            assert_eq!(form_endpoint(), "/api/cv");
        }
    }
}
