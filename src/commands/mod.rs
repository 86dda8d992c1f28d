//! Subcommand implementations.
//!
//! Commands write reports to `out` and lookup errors to `err`, so they can
//! be exercised against in-memory buffers.

mod all;
mod list;
mod one;

pub use all::{Summary, all};
pub use list::list;
pub use one::{one, resolve_service};

use crate::display::Palette;
use crate::http::{ReqwestTransport, Transport};
use crate::services::ServiceCatalog;
use crate::status::StatusClient;

/// Everything a command needs, built once in `main`.
pub struct Context<T: Transport = ReqwestTransport> {
    pub client: StatusClient<T>,
    pub catalog: ServiceCatalog,
    pub palette: Palette,
    pub debug: bool,
}
