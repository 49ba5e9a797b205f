use std::{fs::File, io::Write, path::Path};

use anyhow::{Context, Result};

use crate::models::ClassificationRecord;

const HEADER: [&str; 9] = [
    "ID",
    "Item",
    "Type",
    "Confidence",
    "Date",
    "Time",
    "Description",
    "Location",
    "Disposal Method",
];

/// Flattens records into CSV rows. Missing optional fields become empty cells.
pub fn write_csv<W: Write>(records: &[ClassificationRecord], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER)
        .context("failed to write CSV header")?;

    for record in records {
        csv.write_record([
            record.id.to_string(),
            record.item.clone(),
            record.waste_type.clone(),
            record.confidence.to_string(),
            record.date.clone(),
            record.time.clone(),
            record.description.clone().unwrap_or_default(),
            record.location.clone().unwrap_or_default(),
            record.disposal_method.clone().unwrap_or_default(),
        ])
        .with_context(|| format!("failed to write CSV row for record {}", record.id))?;
    }

    csv.flush().context("failed to flush CSV output")?;
    Ok(())
}

pub fn export_to_path(records: &[ClassificationRecord], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create export file {}", path.display()))?;
    write_csv(records, file)
}
