//! Wire types of the `/api/v2/status.json` endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The status page a report belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,
    pub url: String,
    pub time_zone: String,
    pub updated_at: String,
}

/// Overall status rollup of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub indicator: Indicator,
    pub description: String,
}

/// Body of `/api/v2/status.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub page: Page,
    pub status: Status,
}

/// Severity reported by a status page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    None,
    Minor,
    Major,
    Critical,
    Maintenance,
    /// Any value this tool does not know about, kept verbatim.
    #[serde(untagged)]
    Unknown(String),
}

impl Indicator {
    pub fn as_str(&self) -> &str {
        match self {
            Indicator::None => "none",
            Indicator::Minor => "minor",
            Indicator::Major => "major",
            Indicator::Critical => "critical",
            Indicator::Maintenance => "maintenance",
            Indicator::Unknown(value) => value,
        }
    }

    /// Whether everything is operational.
    pub fn is_operational(&self) -> bool {
        matches!(self, Indicator::None)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GITHUB: &str = r#"{"page":{"id":"x1","name":"GitHub","url":"https://githubstatus.com","time_zone":"Etc/UTC","updated_at":"2024-01-01T00:00:00Z"},"status":{"indicator":"none","description":"All Systems Operational"}}"#;

    #[test]
    fn test_decode_status_response() {
        let response: StatusResponse = serde_json::from_str(GITHUB).unwrap();
        assert_eq!(response.page.id, "x1");
        assert_eq!(response.page.name, "GitHub");
        assert_eq!(response.page.time_zone, "Etc/UTC");
        assert_eq!(response.status.indicator, Indicator::None);
        assert_eq!(response.status.description, "All Systems Operational");
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let json = r#"{
            "page": {"id":"y","name":"npm","url":"https://status.npmjs.org","time_zone":"America/Los_Angeles","updated_at":"2024-05-01T10:00:00.000-07:00","extra":1},
            "status": {"indicator":"major","description":"Partial System Outage"}
        }"#;
        let response: StatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status.indicator, Indicator::Major);
    }

    #[test]
    fn test_unknown_indicator_is_preserved() {
        let json = r#"{"indicator":"degraded","description":"Slow"}"#;
        let status: Status = serde_json::from_str(json).unwrap();
        assert_eq!(status.indicator, Indicator::Unknown("degraded".to_string()));
        assert_eq!(status.indicator.to_string(), "degraded");
        assert!(!status.indicator.is_operational());
    }

    #[test]
    fn test_missing_field_fails() {
        let json = r#"{"page":{"id":"x1","name":"GitHub"},"status":{"indicator":"none","description":"ok"}}"#;
        assert!(serde_json::from_str::<StatusResponse>(json).is_err());
    }
}
