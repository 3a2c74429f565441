//! Terminal rendering for the dashboard views.
//!
//! Owns everything presentational, including the status-to-color
//! lookup. The engine output arrives fully computed; nothing here
//! filters or aggregates.

use complaint_map_complaint_models::{ComplaintRecord, ComplaintStatus};
use complaint_map_query::{AggregateCounts, MapCenter};
use console::{Alignment, Style, measure_text_width, pad_str, style};
use serde::Serialize;

/// Table column headers, matching the web table.
const HEADERS: [&str; 5] = ["ID", "Категория", "Адрес", "Статус", "Дата регистрации"];

/// Maps a status to its display color, the terminal analog of the web
/// UI's tag colors (processing / success / error / default).
fn status_style(status: &ComplaintStatus) -> Style {
    match status {
        ComplaintStatus::InProgress => Style::new().cyan(),
        ComplaintStatus::Resolved => Style::new().green(),
        ComplaintStatus::Rejected => Style::new().red(),
        ComplaintStatus::Unrecognized(_) => Style::new().dim(),
    }
}

/// Prints the full dashboard: counters, filtered table, map center.
pub fn dashboard(
    aggregates: &AggregateCounts,
    filtered: &[&ComplaintRecord],
    total: usize,
    center: MapCenter,
) {
    println!("{}", style("Обращения жителей").bold());
    println!();
    println!(
        "Всего: {}   В работе: {}   Решено: {}   Отклонено: {}",
        style(aggregates.total).bold(),
        style(aggregates.in_progress).cyan(),
        style(aggregates.resolved).green(),
        style(aggregates.rejected).red(),
    );
    println!("Показано: {} / {total}", filtered.len());
    println!();

    table(filtered);

    println!();
    println!("Центр карты: {:.4}, {:.4}", center.lat, center.lng);
    for record in filtered {
        if let Some((lat, lng)) = record.location() {
            println!("  {lat:.4}, {lng:.4}  #{} {}", record.id, record.address);
        }
    }
}

fn table(filtered: &[&ComplaintRecord]) {
    if filtered.is_empty() {
        println!("{}", style("Нет обращений по заданному фильтру").dim());
        return;
    }

    let rows: Vec<[String; 5]> = filtered
        .iter()
        .map(|record| {
            [
                record.id.to_string(),
                record.category.clone(),
                record.address.clone(),
                record.status.as_str().to_string(),
                record.created_at.clone(),
            ]
        })
        .collect();

    // Cyrillic-safe widths via console's text measurement.
    let mut widths: [usize; 5] = HEADERS.map(measure_text_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let header_line: Vec<String> = HEADERS
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| {
            style(pad_str(header, *width, Alignment::Left, None))
                .bold()
                .to_string()
        })
        .collect();
    println!("{}", header_line.join("  "));

    for (record, row) in filtered.iter().zip(rows.iter()) {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(idx, (cell, width))| {
                let padded = pad_str(cell, *width, Alignment::Left, None).to_string();
                if idx == 3 {
                    status_style(&record.status).apply_to(padded).to_string()
                } else {
                    padded
                }
            })
            .collect();
        println!("{}", cells.join("  "));
    }
}

/// Prints every field of one complaint, the terminal analog of the
/// details modal.
pub fn details(record: &ComplaintRecord) {
    println!("{}", style(format!("Обращение #{}", record.id)).bold());
    println!("Категория:         {}", record.category);
    println!("Адрес:             {}", record.address);
    println!(
        "Статус:            {}",
        status_style(&record.status).apply_to(record.status.as_str())
    );
    println!("Дата регистрации:  {}", record.created_at);
    println!(
        "Описание:          {}",
        record.description.as_deref().unwrap_or("—")
    );
    match record.location() {
        Some((lat, lng)) => println!("Координаты:        {lat}, {lng}"),
        None => println!("Координаты:        —"),
    }
    if let Some(photo) = &record.photo {
        println!("Фото:              {photo}");
    }
}

/// Machine-readable dashboard report for `--json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardReport<'a> {
    aggregates: &'a AggregateCounts,
    shown: usize,
    total: usize,
    map_center: MapCenter,
    complaints: &'a [&'a ComplaintRecord],
}

/// Serializes the dashboard state as pretty-printed JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn json_report(
    aggregates: &AggregateCounts,
    filtered: &[&ComplaintRecord],
    total: usize,
    center: MapCenter,
) -> Result<(), serde_json::Error> {
    let report = DashboardReport {
        aggregates,
        shown: filtered.len(),
        total,
        map_center: center,
        complaints: filtered,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
