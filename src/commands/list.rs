//! List command implementation
//!
//! Lists devices across the federated catalogs as one merged page, with
//! the best-effort global device count.

use std::path::PathBuf;

use crate::cli::ListArgs;
use crate::error::Result;
use crate::storage::CatalogStorage;
use crate::ui::display;

use super::helpers;

/// Run list command
pub fn run(config: Option<PathBuf>, overrides: &[String], args: ListArgs) -> Result<()> {
    let federation = helpers::open_federation(config, overrides)?;
    let page = federation.get_many(args.page, args.per_page)?;

    if page.items.is_empty() {
        println!("No devices.");
        return federation.close();
    }

    display::display_page_header("Devices", args.page, page.items.len(), page.total);
    for device in &page.items {
        display::display_device(device, args.detailed);
        println!();
    }

    federation.close()
}
