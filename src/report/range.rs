//! Exact-range report mode.
//!
//! One spreadsheet row per device: availability computed exactly from the
//! device's outage windows over the requested range. A device whose
//! outage fetch fails gets default values (0%, 0s) and the run continues.

use std::path::Path;

use chrono::DateTime;
use rust_xlsxwriter::Workbook;

use super::ReportError;
use crate::api::ApiClient;
use crate::stats::{compute_downtime, DeviceReport, QueryRange};

const COLUMNS: [&str; 7] = [
    "device_id",
    "hostname",
    "sysname",
    "ip",
    "enrollment_date",
    "percentage",
    "downtime_seconds",
];

/// Run the exact-range report. Returns the written file name.
///
/// `start_label` and `end_label` are the DD-MM-YYYY arguments as typed;
/// they name the output file.
pub async fn run(
    client: &ApiClient,
    range: QueryRange,
    start_label: &str,
    end_label: &str,
) -> Result<String, ReportError> {
    print_range_banner(range);

    // A failing device list is fatal: there is nothing to iterate.
    let devices = client.get_devices().await?;

    let mut reports = Vec::with_capacity(devices.len());
    for device in devices {
        let (percentage, downtime_seconds) = match client.get_outages(device.id).await {
            Ok(windows) => compute_downtime(&windows, range),
            Err(e) => {
                tracing::error!("[{}] failed to fetch outages: {}", device.id, e);
                (0.0, 0)
            }
        };

        println!("[{}] {}", device.id, device.hostname);
        println!("    downtime (s): {}", downtime_seconds);
        println!("    availability: {}%", percentage);
        println!("--------------------------------------------------");

        reports.push(DeviceReport {
            device,
            percentage,
            downtime_seconds,
        });
    }

    if reports.is_empty() {
        return Err(ReportError::Empty);
    }

    let filename = format!("disponibilidad_{}_a_{}.xlsx", start_label, end_label);
    write_workbook(&reports, &filename)?;
    Ok(filename)
}

fn print_range_banner(range: QueryRange) {
    println!("--------------------------------------------------");
    if let (Some(start), Some(end)) = (
        DateTime::from_timestamp(range.start, 0),
        DateTime::from_timestamp(range.end, 0),
    ) {
        println!("UTC range start: {}", start);
        println!("UTC range end  : {}", end);
    }
    println!("total seconds  : {}", range.duration());
    println!("--------------------------------------------------");
}

/// Write one row per device, in fetch order.
pub fn write_workbook<P: AsRef<Path>>(
    reports: &[DeviceReport],
    path: P,
) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }

    for (i, report) in reports.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_number(row, 0, report.device.id as f64)?;
        sheet.write_string(row, 1, &report.device.hostname)?;
        sheet.write_string(row, 2, &report.device.sysname)?;
        sheet.write_string(row, 3, &report.device.ip)?;
        sheet.write_string(row, 4, &report.device.enrollment_date)?;
        sheet.write_number(row, 5, report.percentage)?;
        sheet.write_number(row, 6, report.downtime_seconds as f64)?;
    }

    workbook.save(path)?;
    Ok(())
}
