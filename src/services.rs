//! Catalog of known status pages.

use anyhow::{Context, Result};
use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Service picked by default in the interactive prompt.
pub const DEFAULT_SERVICE: &str = "github";

/// Status pages known out of the box.
const BUILTIN: &[(&str, &str)] = &[
    // atlassian
    ("analytics", "https://analytics.status.atlassian.com/api/v2/status.json"),
    ("atlas", "https://atlas.status.atlassian.com/api/v2/status.json"),
    ("compass", "https://compass.status.atlassian.com/api/v2/status.json"),
    ("confluence", "https://confluence.status.atlassian.com/api/v2/status.json"),
    ("developer", "https://developer.status.atlassian.com/api/v2/status.json"),
    ("guard", "https://guard.status.atlassian.com/api/v2/status.json"),
    (
        "jira-service-management",
        "https://jira-service-management.status.atlassian.com/api/v2/status.json",
    ),
    ("jira-software", "https://jira-software.status.atlassian.com/api/v2/status.json"),
    ("opsgenie", "https://opsgenie.status.atlassian.com/api/v2/status.json"),
    ("partners", "https://partners.status.atlassian.com/api/v2/status.json"),
    ("support", "https://support.status.atlassian.com/api/v2/status.json"),
    ("trello", "https://trello.status.atlassian.com/api/v2/status.json"),
    // crypto
    ("hedera", "https://status.hedera.com/api/v2/status.json"),
    ("polygon", "https://status.polygon.technology/api/v2/status.json"),
    ("solana", "https://status.solana.com/api/v2/status.json"),
    // server(less)
    ("cloudflare", "https://www.cloudflarestatus.com/api/v2/status.json"),
    ("flyio", "https://status.flyio.net/api/v2/status.json"),
    ("netlify", "https://www.netlifystatus.com/api/v2/status.json"),
    ("render", "https://status.render.com/api/v2/status.json"),
    ("supabase", "https://status.supabase.com/api/v2/status.json"),
    ("vercel", "https://www.vercel-status.com/api/v2/status.json"),
    // saas
    ("bitbucket", "https://bitbucket.status.atlassian.com/api/v2/status.json"),
    ("github", "https://www.githubstatus.com/api/v2/status.json"),
    ("npm", "https://status.npmjs.org/api/v2/status.json"),
    ("canva", "https://www.canvastatus.com/api/v2/status.json"),
    ("figma", "https://status.figma.com/api/v2/status.json"),
];

/// Service name to status URL, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCatalog {
    entries: BTreeMap<String, String>,
}

impl ServiceCatalog {
    /// The built-in services.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(name, url)| (name.to_string(), url.to_string()))
                .collect(),
        }
    }

    /// Built-in services extended with the services file, if any.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used only when the file is there.
    #[tracing::instrument]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut catalog = Self::builtin();

        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => default_services_file().filter(|p| p.is_file()),
        };

        if let Some(path) = path {
            debug!("Loading services from {:?}", path);
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read services file {:?}", path))?;
            let extra = Self::parse(&content)
                .with_context(|| format!("Invalid services file {:?}", path))?;
            catalog.merge(extra);
        }

        Ok(catalog)
    }

    /// Parses a `{"name": "url"}` JSON object.
    pub fn parse(content: &str) -> Result<Self> {
        let entries: BTreeMap<String, String> =
            serde_json::from_str(content).context("Expected a JSON object of name to URL")?;
        if let Some((name, _)) = entries.iter().find(|(name, url)| name.trim().is_empty() || url.trim().is_empty()) {
            anyhow::bail!("Service '{}' has an empty name or URL", name);
        }
        Ok(Self { entries })
    }

    /// Adds `other`'s services, replacing same-named ones.
    pub fn merge(&mut self, other: ServiceCatalog) {
        self.entries.extend(other.entries);
    }

    pub fn insert(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.entries.insert(name.into(), url.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `<config dir>/status-cli/services.json`
pub fn default_services_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("status-cli").join("services.json"))
}
