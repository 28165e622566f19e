//! Prediction history

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FarmInput, YieldCategory, YieldResult};
use crate::types::{Crop, SoilType};

/// A past prediction as kept in the history log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    pub crop: Crop,
    pub soil: SoilType,
    pub area: Decimal,
    pub rainfall: Decimal,
    #[serde(rename = "yield")]
    pub yield_tons: Decimal,
    pub category: YieldCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl HistoryRecord {
    pub fn new(input: &FarmInput, result: &YieldResult, recorded_at: Option<DateTime<Utc>>) -> Self {
        Self {
            crop: input.crop,
            soil: input.soil_type,
            area: input.area,
            rainfall: input.rainfall,
            yield_tons: result.value,
            category: result.category,
            recorded_at,
        }
    }

    /// Chart label, e.g. "Corn-Black"
    pub fn label(&self) -> String {
        format!("{}-{}", self.crop, self.soil)
    }

    fn matches(&self, needle: &str) -> bool {
        self.crop.name().to_lowercase().contains(needle)
            || self.soil.name().to_lowercase().contains(needle)
    }
}

/// Tally of records per category, for the pie chart
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCounts {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl CategoryCounts {
    pub fn total(&self) -> u32 {
        self.high + self.medium + self.low
    }
}

/// One bar in the yield chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: Decimal,
    pub color: &'static str,
}

/// Append-only ordered log of predictions
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose crop or soil name contains `query`, ignoring case
    pub fn filter(&self, query: &str) -> Vec<&HistoryRecord> {
        let needle = query.trim().to_lowercase();
        self.records.iter().filter(|r| r.matches(&needle)).collect()
    }

    pub fn category_counts(&self) -> CategoryCounts {
        self.records
            .iter()
            .fold(CategoryCounts::default(), |mut counts, record| {
                match record.category {
                    YieldCategory::High => counts.high += 1,
                    YieldCategory::Medium => counts.medium += 1,
                    YieldCategory::Low => counts.low += 1,
                }
                counts
            })
    }

    pub fn chart_series(&self) -> Vec<ChartPoint> {
        self.records
            .iter()
            .map(|r| ChartPoint {
                label: r.label(),
                value: r.yield_tons,
                color: r.category.color_hex(),
            })
            .collect()
    }
}
