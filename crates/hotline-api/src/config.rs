//! Endpoint configuration loaded from environment variables.
//!
//! All settings have defaults pointing at the hosted services, so the client
//! starts with zero configuration; self-hosted users override per endpoint.

/// Base URLs of the three remote services.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Auth service base URL.
    /// Env: `HOTLINE_AUTH_URL`
    pub auth_url: String,

    /// Contacts / friend-graph service base URL.
    /// Env: `HOTLINE_CONTACTS_URL`
    pub contacts_url: String,

    /// Calls service base URL.
    /// Env: `HOTLINE_CALLS_URL`
    pub calls_url: String,

    /// Per-request timeout in seconds.
    /// Env: `HOTLINE_REQUEST_TIMEOUT_SECS`
    /// Default: `15`
    pub request_timeout_secs: u64,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth_url: "https://functions.poehali.dev/90194563-7280-4a93-8dbd-3ee4103a36ca"
                .to_string(),
            contacts_url: "https://functions.poehali.dev/44ce9eab-7ef4-463f-9fd0-635bdd66adbe"
                .to_string(),
            calls_url: "https://functions.poehali.dev/f4fb4581-4cb1-4189-8210-16233c16a79e"
                .to_string(),
            request_timeout_secs: 15,
        }
    }
}

impl Endpoints {
    /// Load configuration from environment variables, falling back to
    /// defaults. Invalid values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("HOTLINE_AUTH_URL") {
            config.auth_url = url;
        }

        if let Ok(url) = std::env::var("HOTLINE_CONTACTS_URL") {
            config.contacts_url = url;
        }

        if let Ok(url) = std::env::var("HOTLINE_CALLS_URL") {
            config.calls_url = url;
        }

        if let Ok(val) = std::env::var("HOTLINE_REQUEST_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(n) if n > 0 => config.request_timeout_secs = n,
                _ => {
                    tracing::warn!(
                        value = %val,
                        "Invalid HOTLINE_REQUEST_TIMEOUT_SECS, using default"
                    );
                }
            }
        }

        config
    }

    /// All three base URLs pointed at one server, for tests and stubs.
    pub fn all_at(base: &str) -> Self {
        Self {
            auth_url: format!("{base}/auth"),
            contacts_url: format!("{base}/contacts"),
            calls_url: format!("{base}/calls"),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_hosted_services() {
        let config = Endpoints::default();
        assert!(config.auth_url.starts_with("https://"));
        assert_eq!(config.request_timeout_secs, 15);
    }

    #[test]
    fn all_at_derives_three_urls() {
        let config = Endpoints::all_at("http://127.0.0.1:9000");
        assert_eq!(config.auth_url, "http://127.0.0.1:9000/auth");
        assert_eq!(config.contacts_url, "http://127.0.0.1:9000/contacts");
        assert_eq!(config.calls_url, "http://127.0.0.1:9000/calls");
    }
}
