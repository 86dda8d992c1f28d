//! Console rendering of status reports.

use chrono::{DateTime, Local, SecondsFormat};
use std::fmt::Display;
use std::io::{self, Write};

use crate::status::{Indicator, StatusResponse};

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

/// Wraps text in ANSI colours, or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, color: &str, text: impl Display) -> String {
        if self.enabled {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn indicator_color(indicator: &Indicator) -> &'static str {
        match indicator {
            Indicator::None => GREEN,
            Indicator::Minor | Indicator::Maintenance => YELLOW,
            Indicator::Major | Indicator::Critical => RED,
            Indicator::Unknown(_) => CYAN,
        }
    }
}

/// RFC 3339 local time, second precision.
pub fn timestamp(now: DateTime<Local>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Bordered report with every field of the response.
pub fn write_full_status<W: Write>(
    out: &mut W,
    palette: Palette,
    response: &StatusResponse,
    timestamp: &str,
) -> io::Result<()> {
    let border = palette.paint(
        BLUE,
        format!("==================== STATUS PAGE ==================== [{}]", timestamp),
    );
    let indicator = &response.status.indicator;

    writeln!(out, "{}", border)?;
    writeln!(out, "{} {}", palette.paint(CYAN, "Page Name    :"), response.page.name)?;
    writeln!(out, "{} {}", palette.paint(CYAN, "Page ID      :"), response.page.id)?;
    writeln!(out, "{} {}", palette.paint(CYAN, "URL          :"), response.page.url)?;
    writeln!(out, "{} {}", palette.paint(CYAN, "Time Zone    :"), response.page.time_zone)?;
    writeln!(out, "{} {}", palette.paint(CYAN, "Updated At   :"), response.page.updated_at)?;
    writeln!(
        out,
        "{} {}",
        palette.paint(GREEN, "Indicator    :"),
        palette.paint(Palette::indicator_color(indicator), indicator)
    )?;
    writeln!(
        out,
        "{} {}",
        palette.paint(YELLOW, "Description  :"),
        response.status.description
    )?;
    writeln!(out, "{}", border)
}

/// `[timestamp] name : description`
pub fn write_summary<W: Write>(
    out: &mut W,
    palette: Palette,
    name: &str,
    response: &StatusResponse,
    timestamp: &str,
) -> io::Result<()> {
    let color = Palette::indicator_color(&response.status.indicator);
    writeln!(
        out,
        "[{}] {}",
        timestamp,
        palette.paint(color, format!("{} : {}", name, response.status.description))
    )
}

/// `[timestamp] Error: message`, with the service name when known.
pub fn write_error<W: Write>(
    out: &mut W,
    palette: Palette,
    name: Option<&str>,
    error: &dyn Display,
    timestamp: &str,
) -> io::Result<()> {
    let label = palette.paint(RED, "Error:");
    match name {
        Some(name) => writeln!(out, "[{}] {} {}: {}", timestamp, label, name, error),
        None => writeln!(out, "[{}] {} {}", timestamp, label, error),
    }
}
