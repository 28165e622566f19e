//! CSV export of schedules and history

use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{AdvisoryError, AdvisoryResult};
use crate::models::{HistoryRecord, ScheduleEntry};

pub const SCHEDULE_FILENAME: &str = "fertilizer_schedule.csv";
pub const HISTORY_FILENAME: &str = "yield_history.csv";

#[derive(Serialize)]
struct HistoryRow<'a> {
    #[serde(rename = "Crop")]
    crop: &'a str,
    #[serde(rename = "Soil")]
    soil: &'a str,
    #[serde(rename = "Area")]
    area: Decimal,
    #[serde(rename = "Rainfall")]
    rainfall: Decimal,
    #[serde(rename = "Yield")]
    yield_tons: Decimal,
    #[serde(rename = "Category")]
    category: String,
}

/// Serialize rows into a CSV string, writing the header from field names
pub fn export_to_csv<T: Serialize>(data: &[T], quote_style: QuoteStyle) -> AdvisoryResult<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(quote_style)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);
    for record in data {
        wtr.serialize(record)
            .map_err(|e| AdvisoryError::Export(format!("CSV serialization error: {}", e)))?;
    }
    finish(wtr)
}

/// Schedule table as CSV
///
/// The header row is plain; every data cell is quoted, with inner quotes
/// doubled.
pub fn schedule_to_csv(schedule: &[ScheduleEntry]) -> AdvisoryResult<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(b"Day,Task,Notes\n".to_vec());
    for entry in schedule {
        let day = format!("Day {}", entry.day);
        let task = entry.task.to_string();
        wtr.write_record([day.as_str(), task.as_str(), entry.notes.as_str()])
            .map_err(|e| AdvisoryError::Export(format!("CSV write error: {}", e)))?;
    }
    finish(wtr)
}

/// History table as CSV, quoting only where needed
pub fn history_to_csv<'a, I>(records: I) -> AdvisoryResult<String>
where
    I: IntoIterator<Item = &'a HistoryRecord>,
{
    let rows: Vec<HistoryRow<'_>> = records
        .into_iter()
        .map(|r| HistoryRow {
            crop: r.crop.name(),
            soil: r.soil.name(),
            area: r.area,
            rainfall: r.rainfall,
            yield_tons: r.yield_tons,
            category: r.category.to_string(),
        })
        .collect();

    if rows.is_empty() {
        return Ok("Crop,Soil,Area,Rainfall,Yield,Category\n".to_string());
    }
    export_to_csv(&rows, QuoteStyle::Necessary)
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> AdvisoryResult<String> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| AdvisoryError::Export(format!("CSV writer error: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AdvisoryError::Export(format!("UTF-8 conversion error: {}", e)))
}
