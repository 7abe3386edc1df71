// 📤 CSV Export - amortization schedules and savings projections

use crate::emi::AmortizationRow;
use crate::savings::ProjectionPoint;
use anyhow::{Context as AnyhowContext, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

fn write_rows<W: Write, T: Serialize>(rows: &[T], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row).context("Failed to write CSV row")?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub fn write_schedule_csv<W: Write>(rows: &[AmortizationRow], writer: W) -> Result<()> {
    write_rows(rows, writer)
}

pub fn write_projection_csv<W: Write>(points: &[ProjectionPoint], writer: W) -> Result<()> {
    write_rows(points, writer)
}

pub fn export_schedule_to_path<P: AsRef<Path>>(rows: &[AmortizationRow], path: P) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("Failed to create CSV file: {:?}", path.as_ref()))?;
    write_schedule_csv(rows, file)?;
    tracing::info!(rows = rows.len(), path = ?path.as_ref(), "schedule exported");
    Ok(())
}

pub fn export_projection_to_path<P: AsRef<Path>>(points: &[ProjectionPoint], path: P) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("Failed to create CSV file: {:?}", path.as_ref()))?;
    write_projection_csv(points, file)?;
    tracing::info!(rows = points.len(), path = ?path.as_ref(), "projection exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_csv_has_header_and_rows() {
        let rows = vec![
            AmortizationRow {
                period: 1,
                principal_portion: 75.5,
                interest_portion: 24.5,
                remaining_balance: 924.5,
            },
            AmortizationRow {
                period: 2,
                principal_portion: 76.0,
                interest_portion: 24.0,
                remaining_balance: 848.5,
            },
        ];

        let mut buffer = Vec::new();
        write_schedule_csv(&rows, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "period,principal_portion,interest_portion,remaining_balance"
        );
        assert_eq!(lines[1], "1,75.5,24.5,924.5");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_projection_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projection.csv");
        let points = vec![
            ProjectionPoint { month: 1, balance: 1104.17 },
            ProjectionPoint { month: 2, balance: 1208.77 },
        ];

        export_projection_to_path(&points, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("month,balance\n"));
        assert!(text.contains("2,1208.77"));
    }

    #[test]
    fn test_export_to_missing_directory_fails_with_context() {
        let err = export_schedule_to_path(&[], "/nonexistent-dir/schedule.csv").unwrap_err();
        assert!(err.to_string().contains("Failed to create CSV file"));
    }
}
