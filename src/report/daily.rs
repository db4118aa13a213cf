//! Daily/total aggregate report mode.
//!
//! Availability here is averaged from the API's pre-aggregated samples,
//! not recomputed from outages. Per-(device, day) rows gate the run: when
//! none exist, no file is written. The spreadsheet itself carries one
//! total row per device, best availability first.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;

use super::ReportError;
use crate::api::ApiClient;
use crate::stats::{daily_stats, total_stats, DailyStat, Device, TotalStat};

const SHEET_NAME: &str = "Disponibilidad Total";

const COLUMNS: [&str; 8] = [
    "equipo",
    "sysname",
    "ip",
    "fecha_incorporacion",
    "percentage",
    "horas_online",
    "horas_offline",
    "tiempo_total",
];

/// One assembled (device, day) row.
#[derive(Debug, Clone)]
pub struct DailyRow {
    pub device_id: i64,
    pub stat: DailyStat,
}

/// Fetch and aggregate every device's samples, returning the assembled
/// (device, day) rows and the per-device totals sorted best-first.
///
/// A failing device list or availability fetch degrades to an empty set
/// for the affected scope rather than aborting; the caller's empty-row
/// gate reports that to the user.
pub async fn assemble(
    client: &ApiClient,
    start: NaiveDate,
    end: NaiveDate,
) -> (Vec<DailyRow>, Vec<(Device, TotalStat)>) {
    let devices = match client.get_devices().await {
        Ok(devices) => devices,
        Err(e) => {
            tracing::error!("failed to fetch devices: {}", e);
            Vec::new()
        }
    };

    let mut daily_rows = Vec::new();
    let mut totals: Vec<(Device, TotalStat)> = Vec::new();

    for device in devices {
        let samples = match client.get_availability(device.id, start, end).await {
            Ok(samples) => samples,
            Err(e) => {
                tracing::error!(
                    "failed to fetch availability for device {}: {}",
                    device.id,
                    e
                );
                Vec::new()
            }
        };

        for stat in daily_stats(&samples, start, end) {
            daily_rows.push(DailyRow {
                device_id: device.id,
                stat,
            });
        }
        totals.push((device, total_stats(&samples, start, end)));
    }

    // Best availability first.
    totals.sort_by(|a, b| {
        b.1.percentage
            .partial_cmp(&a.1.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    (daily_rows, totals)
}

/// Run the aggregate report for `[start, end]`. Returns the written
/// file name.
pub async fn run(
    client: &ApiClient,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<String, ReportError> {
    let (daily_rows, totals) = assemble(client, start, end).await;

    if daily_rows.is_empty() {
        return Err(ReportError::Empty);
    }
    for row in &daily_rows {
        tracing::debug!(
            "device {} {}: {}% over {} samples, {}h online / {}h offline of {}h",
            row.device_id,
            row.stat.date,
            row.stat.percentage,
            row.stat.samples,
            row.stat.hours_online,
            row.stat.hours_offline,
            row.stat.hours_total
        );
    }

    fs::create_dir_all("reportes")?;
    let filename = format!(
        "reportes/disponibilidad_{}_{}.xlsx",
        start.format("%Y%m%d"),
        end.format("%Y%m%d")
    );
    write_total_sheet(&totals, &filename)?;

    print_summary(&totals, start, end);
    Ok(filename)
}

/// Write the "Disponibilidad Total" sheet, one row per device.
pub fn write_total_sheet<P: AsRef<Path>>(
    totals: &[(Device, TotalStat)],
    path: P,
) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }

    for (i, (device, total)) in totals.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &device.hostname)?;
        sheet.write_string(row, 1, &device.sysname)?;
        sheet.write_string(row, 2, &device.ip)?;
        sheet.write_string(row, 3, &device.enrollment_date)?;
        sheet.write_number(row, 4, total.percentage)?;
        sheet.write_number(row, 5, total.hours_online)?;
        sheet.write_number(row, 6, total.hours_offline)?;
        sheet.write_number(row, 7, total.hours_total)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn print_summary(totals: &[(Device, TotalStat)], start: NaiveDate, end: NaiveDate) {
    println!("\nReport summary:");
    println!("  period : {} to {}", start, end);
    println!("  devices: {}", totals.len());

    if totals.is_empty() {
        return;
    }

    let fleet_avg =
        totals.iter().map(|(_, t)| t.percentage).sum::<f64>() / totals.len() as f64;
    println!("  fleet average availability: {:.2}%", fleet_avg);

    // Sorted descending, so first is best and last is worst.
    let (best, best_stat) = &totals[0];
    let (worst, worst_stat) = &totals[totals.len() - 1];
    println!(
        "  best : {} ({}) - {:.2}%",
        best.hostname, best.sysname, best_stat.percentage
    );
    println!(
        "  worst: {} ({}) - {:.2}%",
        worst.hostname, worst.sysname, worst_stat.percentage
    );
}
