//! CSV export of asset lists.

use std::io::Write;

use crate::schema::Asset;
use crate::Result;

const HEADER: [&str; 12] = [
    "id",
    "name",
    "type",
    "status",
    "criticality",
    "facility",
    "area",
    "serial_number",
    "brand",
    "model_code",
    "install_date",
    "next_maintenance",
];

/// Write `assets` as CSV (header plus one row each). Fields are quoted as needed.
pub fn export_assets_csv<'a, W: Write>(
    assets: impl IntoIterator<Item = &'a Asset>,
    writer: W,
) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    let mut rows = 0;
    for asset in assets {
        let install_date = asset.install_date.to_string();
        let next_maintenance = asset
            .next_maintenance
            .map(|d| d.to_string())
            .unwrap_or_default();
        wtr.write_record([
            asset.id.as_str(),
            asset.name.as_str(),
            asset.equipment_type.as_str(),
            asset.status.as_str(),
            asset.criticality.as_str(),
            asset.location.facility.as_str(),
            asset.location.area.as_str(),
            asset.serial_number.as_str(),
            asset.brand.as_str(),
            asset.model_code.as_str(),
            install_date.as_str(),
            next_maintenance.as_str(),
        ])?;
        rows += 1;
    }

    wtr.flush()?;
    Ok(rows)
}

/// Export to an in-memory string.
pub fn assets_to_csv<'a>(assets: impl IntoIterator<Item = &'a Asset>) -> Result<String> {
    let mut buf = Vec::new();
    export_assets_csv(assets, &mut buf)?;
    String::from_utf8(buf).map_err(|e| crate::Error::InvalidInput(e.to_string()))
}
