//! Get command implementation
//!
//! Looks an id up across the federated catalogs in order and shows the
//! first hit.

use std::path::PathBuf;

use crate::cli::GetArgs;
use crate::error::Result;
use crate::storage::CatalogStorage;
use crate::ui::display;

use super::helpers;

/// Run get command
pub fn run(config: Option<PathBuf>, overrides: &[String], args: GetArgs) -> Result<()> {
    let federation = helpers::open_federation(config, overrides)?;

    if args.resource {
        let resource = federation.get_resource_by_id(&args.id)?;
        display::display_resource(&resource, "  ");
    } else {
        let device = federation.get(&args.id)?;
        display::display_device(&device, true);
    }

    federation.close()
}
