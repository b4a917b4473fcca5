//! User-Agent string sent with every search API request.
//!
//! GitHub rejects API requests without a User-Agent, and asks that it identify
//! the application so abusive traffic can be traced back to a contact.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/repo-harvester";

/// Default User-Agent for search requests (identifies the tool and its version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("repo-harvester/{version} (dataset-collector; +{PROJECT_UA_URL})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_contains_version_and_project_url() {
        let ua = default_user_agent();
        assert!(ua.contains(PROJECT_UA_URL), "UA must contain project URL");
        assert_eq!(
            env!("CARGO_PKG_VERSION"),
            ua.strip_prefix("repo-harvester/")
                .and_then(|s| s.split(' ').next())
                .expect("UA has version"),
            "UA must contain crate version"
        );
    }

    #[test]
    fn test_user_agent_identifies_as_collector() {
        let ua = default_user_agent();
        assert!(
            ua.contains("dataset-collector"),
            "UA must identify as dataset-collector: {ua}"
        );
    }
}
