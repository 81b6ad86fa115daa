// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use command_derive::{EntityMapper, FieldMap, FieldSet};

#[derive(Debug, Default)]
pub struct Device {
    pub name: String,
    pub label: Option<String>,
    pub port: u16,
    pub ratio: Option<f64>,
    pub vendor: Option<String>,
}

#[derive(Debug, Default)]
pub struct DeviceSummary {
    pub name: Option<String>,
}

#[derive(FieldMap)]
#[field_map(into = "Device")]
pub struct VendorInput {
    pub vendor: Option<String>,
}

fn percent(value: &u8) -> Result<f64, std::convert::Infallible> {
    Ok(f64::from(*value) / 100.0)
}

/// Every field option together.
#[derive(FieldMap)]
#[field_map(into = "Device")]
pub struct DeviceInput {
    pub name: String,

    #[map(rename = "label")]
    pub display_name: Option<String>,

    #[map(try_into)]
    pub port: Option<u32>,

    #[map(with = "percent")]
    pub ratio: Option<u8>,

    #[map(skip)]
    pub confirm: bool,

    #[map(flatten)]
    pub vendor: VendorInput,
}

/// Same source, several destinations.
#[derive(FieldMap)]
#[field_map(into = "Device", into = "DeviceSummary")]
pub struct NameInput {
    pub name: Option<String>,
}

fn main() {
    let input = DeviceInput {
        name: "router".to_string(),
        display_name: None,
        port: Some(8080),
        ratio: Some(50),
        confirm: true,
        vendor: VendorInput {
            vendor: Some("acme".to_string()),
        },
    };
    let device: Device = EntityMapper::new().map_new(&input, &FieldSet::new());
    assert_eq!(device.port, 8080);
    assert_eq!(device.ratio, Some(0.5));
    assert_eq!(device.vendor.as_deref(), Some("acme"));

    let name = NameInput {
        name: Some("switch".to_string()),
    };
    let summary: DeviceSummary = EntityMapper::new().map_new(&name, &FieldSet::new());
    let device: Device = EntityMapper::new().map_new(&name, &FieldSet::new());
    assert_eq!(summary.name.as_deref(), Some("switch"));
    assert_eq!(device.name, "switch");
}
