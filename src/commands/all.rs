//! The `all` command: one summary line per known service.

use anyhow::Result;
use chrono::Local;
use log::debug;
use std::io::Write;

use crate::display::{timestamp, write_error, write_summary};
use crate::http::Transport;

use super::Context;

/// Outcome counts of an `all` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Prints one summary line per catalog entry, one lookup at a time.
///
/// A failed lookup prints an error line and does not stop the run.
#[tracing::instrument(skip(ctx, out, err))]
pub async fn all<T: Transport, O: Write, E: Write>(
    ctx: &Context<T>,
    out: &mut O,
    err: &mut E,
) -> Result<Summary> {
    let mut summary = Summary::default();

    for (name, url) in ctx.catalog.iter() {
        debug!("Fetching status of {} from {}", name, url);
        match ctx.client.fetch(url, ctx.debug).await {
            Ok(response) => {
                write_summary(out, ctx.palette, name, &response, &timestamp(Local::now()))?;
                summary.succeeded += 1;
            }
            Err(e) => {
                write_error(err, ctx.palette, Some(name), &e, &timestamp(Local::now()))?;
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{OPERATIONAL, context};

    #[tokio::test]
    async fn test_all_continues_after_failures() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("GET", "/ok/api/v2/status.json")
            .with_status(200)
            .with_body(OPERATIONAL)
            .create_async()
            .await;
        let broken = server
            .mock("GET", "/broken/api/v2/status.json")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let base = server.url();
        let ctx = context(&[
            ("alpha", format!("{}/broken/api/v2/status.json", base)),
            ("beta", format!("{}/ok/api/v2/status.json", base)),
        ]);
        let mut out = Vec::new();
        let mut err = Vec::new();

        let summary = all(&ctx, &mut out, &mut err).await.unwrap();

        ok.assert_async().await;
        broken.assert_async().await;
        assert_eq!(
            summary,
            Summary {
                succeeded: 1,
                failed: 1
            }
        );

        let out = String::from_utf8(out).unwrap();
        assert!(out.ends_with("] beta : All Systems Operational\n"));
        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("Error: alpha: Failed to parse status response"));
    }

    #[tokio::test]
    async fn test_all_with_empty_catalog() {
        let ctx = context(&[]);
        let mut out = Vec::new();
        let mut err = Vec::new();

        let summary = all(&ctx, &mut out, &mut err).await.unwrap();

        assert_eq!(summary, Summary::default());
        assert!(out.is_empty());
        assert!(err.is_empty());
    }
}
