//! The `list` command.

use anyhow::Result;
use std::io::Write;

use crate::services::ServiceCatalog;

/// Prints `name  url` for every service, names aligned.
pub fn list<W: Write>(catalog: &ServiceCatalog, out: &mut W) -> Result<()> {
    let width = catalog.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, url) in catalog.iter() {
        writeln!(out, "{:<width$}  {}", name, url, width = width)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_aligns_names() {
        let mut catalog = ServiceCatalog::default();
        catalog.insert("npm", "https://status.npmjs.org/api/v2/status.json");
        catalog.insert("cloudflare", "https://www.cloudflarestatus.com/api/v2/status.json");

        let mut out = Vec::new();
        list(&catalog, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "cloudflare  https://www.cloudflarestatus.com/api/v2/status.json\n\
             npm         https://status.npmjs.org/api/v2/status.json\n"
        );
    }

    #[test]
    fn test_list_builtin_has_every_service() {
        let mut out = Vec::new();
        list(&ServiceCatalog::builtin(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 26);
    }
}
