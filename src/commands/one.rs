//! The `one` command: full report for a single service.

use anyhow::{Result, bail};
use chrono::Local;
use log::debug;
use std::io::{BufRead, Write};

use crate::display::{timestamp, write_error, write_full_status};
use crate::http::Transport;
use crate::prompt::select_with_io;
use crate::services::{DEFAULT_SERVICE, ServiceCatalog};

use super::Context;

/// Returns the service to show, asking on `input` when none was given.
pub fn resolve_service<R: BufRead, W: Write>(
    catalog: &ServiceCatalog,
    name: Option<&str>,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    let name = match name {
        Some(name) => name.to_string(),
        None => select_with_io(
            "Choose a service:",
            &catalog.names(),
            Some(DEFAULT_SERVICE),
            input,
            output,
        )?,
    };

    if catalog.get(&name).is_none() {
        bail!(
            "Unknown service '{}'. Run `status-cli list` to see the available services.",
            name
        );
    }
    Ok(name)
}

/// Prints the full report of one service.
///
/// Returns `false` when the lookup failed; the error has then been written to `err`.
#[tracing::instrument(skip(ctx, out, err))]
pub async fn one<T: Transport, O: Write, E: Write>(
    ctx: &Context<T>,
    service: &str,
    out: &mut O,
    err: &mut E,
) -> Result<bool> {
    let Some(url) = ctx.catalog.get(service) else {
        bail!("Unknown service '{}'.", service);
    };
    debug!("Fetching status of {} from {}", service, url);

    match ctx.client.fetch(url, ctx.debug).await {
        Ok(response) => {
            write_full_status(out, ctx.palette, &response, &timestamp(Local::now()))?;
            Ok(true)
        }
        Err(e) => {
            write_error(err, ctx.palette, Some(service), &e, &timestamp(Local::now()))?;
            Ok(false)
        }
    }
}
