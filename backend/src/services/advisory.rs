//! Advisory service: runs the engine and keeps the session store current

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::RwLock;

use shared::{
    advise, derive_soil_advice, generate_schedule, validate_soil_reading, Advisory,
    AdvisoryStore, CategoryCounts, ChartPoint, FarmInput, HistoryRecord, MemoryStore,
    ScheduleEntry, SoilAdvice, SoilReading,
};

use crate::error::{AppError, AppResult};

/// Store shared by every request
pub type SharedStore = Arc<RwLock<AdvisoryStore<MemoryStore>>>;

/// Create an empty in-process store
pub fn new_shared_store() -> AppResult<SharedStore> {
    let store = AdvisoryStore::load(MemoryStore::new())?;
    Ok(Arc::new(RwLock::new(store)))
}

/// Service wrapping the advisory engine
#[derive(Clone)]
pub struct AdvisoryService {
    store: SharedStore,
    simulated_latency: Duration,
}

/// Chart data for the history dashboard
#[derive(Debug, Serialize)]
pub struct HistorySummary {
    pub total: u32,
    pub counts: CategoryCounts,
    pub series: Vec<ChartPoint>,
}

impl AdvisoryService {
    pub fn new(store: SharedStore, simulated_latency: Duration) -> Self {
        Self {
            store,
            simulated_latency,
        }
    }

    /// Predict yield and advice for a farm, then append it to the history
    ///
    /// Uses `soil` when given, otherwise the stored reading, otherwise the
    /// neutral default.
    pub async fn predict(
        &self,
        input: FarmInput,
        soil: Option<SoilReading>,
    ) -> AppResult<Advisory> {
        if !self.simulated_latency.is_zero() {
            tokio::time::sleep(self.simulated_latency).await;
        }

        let mut store = self.store.write().await;
        let reading = soil.or_else(|| store.soil().cloned());
        let advisory = advise(&input, reading.as_ref())?;

        store.record(HistoryRecord::new(
            &input,
            &advisory.yield_result,
            Some(Utc::now()),
        ))?;

        tracing::info!(
            crop = %advisory.crop,
            soil = %advisory.soil,
            yield_tons = %advisory.yield_result.value,
            category = %advisory.category(),
            "Prediction recorded"
        );

        Ok(advisory)
    }

    pub async fn soil(&self) -> Option<SoilReading> {
        self.store.read().await.soil().cloned()
    }

    /// Persist a soil reading and return its advice
    pub async fn save_soil(&self, reading: SoilReading) -> AppResult<Vec<SoilAdvice>> {
        self.store.write().await.save_soil(&reading)?;
        tracing::info!(ph = %reading.ph, "Soil reading saved");
        Ok(derive_soil_advice(&reading))
    }

    /// Advice for an ad-hoc reading, nothing is stored
    pub fn soil_advice(&self, reading: &SoilReading) -> AppResult<Vec<SoilAdvice>> {
        validate_soil_reading(reading)?;
        Ok(derive_soil_advice(reading))
    }

    /// Schedule for a given yield, using the stored soil reading when none is passed
    pub async fn schedule(
        &self,
        yield_value: Decimal,
        soil: Option<SoilReading>,
    ) -> AppResult<Vec<ScheduleEntry>> {
        if yield_value < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "yield".to_string(),
                message: "Yield cannot be negative".to_string(),
            });
        }

        let reading = match soil {
            Some(reading) => {
                validate_soil_reading(&reading)?;
                reading
            }
            None => self.soil().await.unwrap_or_default(),
        };
        Ok(generate_schedule(Some(yield_value), Some(&reading)))
    }

    /// Schedule for the most recent prediction
    pub async fn latest_schedule(&self) -> AppResult<Vec<ScheduleEntry>> {
        let store = self.store.read().await;
        let latest = store
            .history()
            .latest()
            .ok_or_else(|| AppError::NotFound("Prediction history".to_string()))?;
        let reading = store.soil().cloned().unwrap_or_default();
        Ok(generate_schedule(Some(latest.yield_tons), Some(&reading)))
    }

    /// History records, optionally filtered by crop or soil name
    pub async fn history(&self, filter: Option<&str>) -> Vec<HistoryRecord> {
        let store = self.store.read().await;
        match filter {
            Some(query) => store.history().filter(query).into_iter().cloned().collect(),
            None => store.history().records().to_vec(),
        }
    }

    pub async fn clear_history(&self) -> AppResult<usize> {
        let mut store = self.store.write().await;
        let removed = store.history().len();
        store.clear_history()?;
        tracing::info!(removed, "History cleared");
        Ok(removed)
    }

    pub async fn summary(&self) -> HistorySummary {
        let store = self.store.read().await;
        let counts = store.history().category_counts();
        HistorySummary {
            total: counts.total(),
            counts,
            series: store.history().chart_series(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Crop, SoilType, YieldCategory};

    fn service() -> AdvisoryService {
        AdvisoryService::new(new_shared_store().unwrap(), Duration::ZERO)
    }

    fn corn_input() -> FarmInput {
        FarmInput::new(Crop::Corn, SoilType::Black, Decimal::from(2), Decimal::from(30)).unwrap()
    }

    #[tokio::test]
    async fn test_predict_records_history() {
        let service = service();
        let advisory = service.predict(corn_input(), None).await.unwrap();
        assert_eq!(advisory.yield_result.value, Decimal::new(880, 2));

        let history = service.history(None).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].category, YieldCategory::High);
        assert!(history[0].recorded_at.is_some());
    }

    #[tokio::test]
    async fn test_predict_uses_stored_soil() {
        let service = service();
        let soil = SoilReading::new(
            Decimal::new(65, 1),
            Decimal::from(5),
            Decimal::from(5),
            Decimal::from(5),
        );
        service.save_soil(soil).await.unwrap();
        let advisory = service.predict(corn_input(), None).await.unwrap();
        // 5 * 1.1 * 1.7 * 0.8 * 2
        assert_eq!(advisory.yield_result.value, Decimal::new(1496, 2));
    }

    #[tokio::test]
    async fn test_latest_schedule_requires_history() {
        let service = service();
        assert!(matches!(
            service.latest_schedule().await,
            Err(AppError::NotFound(_))
        ));
        service.predict(corn_input(), None).await.unwrap();
        assert_eq!(service.latest_schedule().await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_clear_history_and_summary() {
        let service = service();
        service.predict(corn_input(), None).await.unwrap();
        service.predict(corn_input(), None).await.unwrap();
        assert_eq!(service.summary().await.counts.high, 2);
        assert_eq!(service.clear_history().await.unwrap(), 2);
        assert_eq!(service.summary().await.total, 0);
    }

    #[tokio::test]
    async fn test_negative_yield_schedule_rejected() {
        let result = service().schedule(Decimal::from(-1), None).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
