//! Filter command implementation
//!
//! Attribute-path filtering across the federated catalogs. Device filters
//! return matching devices; resource filters return the owning devices
//! carrying only their matching resources.

use std::path::PathBuf;
use std::str::FromStr;

use crate::cli::FilterArgs;
use crate::error::Result;
use crate::filter::FilterOp;
use crate::storage::CatalogStorage;
use crate::ui::display;

use super::helpers;

/// Run filter command
pub fn run(config: Option<PathBuf>, overrides: &[String], args: FilterArgs) -> Result<()> {
    let op = FilterOp::from_str(&args.op)?;
    let federation = helpers::open_federation(config, overrides)?;

    if args.one {
        if args.resources {
            let resource = federation.path_filter_resource(&args.path, op, &args.value)?;
            display::display_resource(&resource, "  ");
        } else {
            let device = federation.path_filter_device(&args.path, op, &args.value)?;
            display::display_device(&device, true);
        }
        return federation.close();
    }

    let page = if args.resources {
        federation.path_filter_resources(&args.path, op, &args.value, args.page, args.per_page)?
    } else {
        federation.path_filter_devices(&args.path, op, &args.value, args.page, args.per_page)?
    };

    if page.items.is_empty() {
        println!("No matches.");
        return federation.close();
    }

    let what = if args.resources {
        "Devices with matching resources"
    } else {
        "Matching devices"
    };
    display::display_page_header(what, args.page, page.items.len(), page.total);
    for device in &page.items {
        display::display_device(device, args.detailed || args.resources);
        println!();
    }

    federation.close()
}
