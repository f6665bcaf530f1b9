//! URL construction for server endpoints

/// Health check endpoint
pub fn health_url(base_url: &str) -> String {
    format!("{}/healthz", base_url)
}

/// Run trigger endpoint for a family ("monthly", "annual", or "all")
pub fn run_url(base_url: &str, family: &str) -> String {
    format!("{}/run/{}", base_url, family)
}

/// Manifest listing endpoint
pub fn list_url(base_url: &str) -> String {
    format!("{}/list", base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        assert_eq!(health_url("http://localhost:8000"), "http://localhost:8000/healthz");
        assert_eq!(
            run_url("http://localhost:8000", "annual"),
            "http://localhost:8000/run/annual"
        );
        assert_eq!(list_url("http://localhost:8000"), "http://localhost:8000/list");
    }
}
