use std::fs;
use std::path::Path;

use chrono::Local;
use log::info;

use crate::cli::{Args, Mode, OutputFormat};
use crate::constants::{DATETIME_FORMAT, RESULTS_DIR};
use crate::error::Result;
use crate::modes::Row;

/// Renders one ResultSet the way the command line asked for.
pub fn control_output(results: &[Row], args: &Args) -> Result<()> {
    match args.output {
        Some(OutputFormat::Pretty) => pretty_output(results),
        Some(OutputFormat::File) => file_output(results, args.mode)?,
        None => default_output(results),
    }
    Ok(())
}

fn default_output(results: &[Row]) {
    for (first, second, third) in results {
        println!("{} {} {}", first, second, third);
    }
}

/// ASCII table with column widths taken from the widest cell, header row
/// separated from the data rows.
fn pretty_output(results: &[Row]) {
    let mut widths = [0usize; 3];
    for row in results {
        widths[0] = widths[0].max(row.0.chars().count());
        widths[1] = widths[1].max(row.1.chars().count());
        widths[2] = widths[2].max(row.2.chars().count());
    }

    let rule = format!(
        "+-{}-+-{}-+-{}-+",
        "-".repeat(widths[0]),
        "-".repeat(widths[1]),
        "-".repeat(widths[2])
    );

    println!("{}", rule);
    for (i, row) in results.iter().enumerate() {
        println!(
            "| {:<w0$} | {:<w1$} | {:<w2$} |",
            row.0,
            row.1,
            row.2,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        );
        if i == 0 {
            println!("{}", rule);
        }
    }
    println!("{}", rule);
}

fn file_output(results: &[Row], mode: Mode) -> Result<()> {
    fs::create_dir_all(RESULTS_DIR)?;
    let timestamp = Local::now().format(DATETIME_FORMAT);
    let file_path =
        Path::new(RESULTS_DIR).join(format!("{}_{}.csv", mode.as_str(), timestamp));
    write_csv(results, &file_path)?;
    info!("Results saved to {}", file_path.display());
    Ok(())
}

fn write_csv(results: &[Row], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (first, second, third) in results {
        writer.write_record([first, second, third])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_rows() -> Vec<Row> {
        vec![
            (
                "Documentation link".to_string(),
                "Version".to_string(),
                "Status".to_string(),
            ),
            ("/3.11/".to_string(), "3.11".to_string(), "stable".to_string()),
        ]
    }

    #[test]
    fn test_write_csv_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latest-versions_test.csv");
        write_csv(&sample_rows(), &path).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap();
        let records: Vec<csv::StringRecord> =
            reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "Documentation link");
        assert_eq!(&records[1][1], "3.11");
    }

    #[test]
    fn test_write_csv_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_csv(&sample_rows()[..1], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
