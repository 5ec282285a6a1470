//! Display functions for devices and resources
//!
//! Rendering used by the query commands. The simple format is one block
//! per device; the detailed format additionally lists each resource with
//! its protocols.

use console::Style;

use crate::model::{Device, Resource};

/// Display a device, optionally with its resources
pub fn display_device(device: &Device, detailed: bool) {
    println!("  {}", Style::new().bold().yellow().apply_to(&device.id));
    println!(
        "    {} {}",
        Style::new().bold().apply_to("Name:"),
        device.name
    );
    if !device.description.is_empty() {
        println!(
            "    {} {}",
            Style::new().bold().apply_to("Description:"),
            device.description
        );
    }
    if !device.kind.is_empty() {
        println!(
            "    {} {}",
            Style::new().bold().apply_to("Type:"),
            device.kind
        );
    }
    if detailed {
        if let Some(updated) = device.updated {
            println!(
                "    {} {}",
                Style::new().bold().apply_to("Updated:"),
                updated.to_rfc3339()
            );
        }
    }

    if device.resources.is_empty() {
        return;
    }
    println!(
        "    {} ({})",
        Style::new().bold().apply_to("Resources:"),
        device.resources.len()
    );
    for resource in &device.resources {
        if detailed {
            display_resource(resource, "      ");
        } else {
            println!("      {}", resource.id);
        }
    }
}

/// Display a resource with its protocols
pub fn display_resource(resource: &Resource, indent: &str) {
    println!(
        "{indent}{}",
        Style::new().bold().yellow().apply_to(&resource.id)
    );
    println!(
        "{indent}  {} {}",
        Style::new().bold().apply_to("Name:"),
        resource.name
    );
    if !resource.device.is_empty() {
        println!(
            "{indent}  {} {}",
            Style::new().bold().apply_to("Device:"),
            resource.device
        );
    }
    for protocol in &resource.protocols {
        let methods = protocol.methods.join(", ");
        println!(
            "{indent}  {} {} [{}]",
            Style::new().bold().apply_to("Protocol:"),
            protocol.kind,
            methods
        );
    }
}

/// Display the page header of a listing
pub fn display_page_header(what: &str, page: usize, shown: usize, total: usize) {
    println!(
        "{} (page {page}, {shown} of {total} total):",
        Style::new().bold().apply_to(what)
    );
    println!();
}
