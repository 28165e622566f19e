//! Weekly fertilizer and irrigation schedule

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SoilReading;

/// Number of days covered by a schedule
pub const SCHEDULE_DAYS: u8 = 7;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScheduleTask {
    Fertilization,
    Irrigation,
}

impl std::fmt::Display for ScheduleTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleTask::Fertilization => write!(f, "Fertilization"),
            ScheduleTask::Irrigation => write!(f, "Irrigation"),
        }
    }
}

/// One day of the schedule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// 1-based day index
    pub day: u8,
    pub task: ScheduleTask,
    pub notes: String,
}

/// Fertilizers needed for the nutrient deficits in a reading
pub fn fertilizer_needs(soil: &SoilReading) -> Vec<&'static str> {
    let mut needs = Vec::new();
    if soil.is_nitrogen_low() {
        needs.push("Nitrogen-rich fertilizer");
    }
    if soil.is_phosphorus_low() {
        needs.push("Phosphate fertilizer");
    }
    if soil.is_potassium_low() {
        needs.push("Potash fertilizer");
    }
    if needs.is_empty() {
        needs.push("Balanced NPK fertilizer");
    }
    needs
}

/// Irrigation cadence for a yield value, using the category thresholds
pub fn irrigation_cadence(yield_value: Decimal) -> &'static str {
    if yield_value > Decimal::from(7) {
        "Daily irrigation"
    } else if yield_value > Decimal::from(3) {
        "Every 2 days"
    } else {
        "Every 3 days"
    }
}

/// Generate a full week of alternating tasks
///
/// Odd days fertilize, even days irrigate. Returns an empty schedule when
/// either the yield or the soil reading is missing.
pub fn generate_schedule(
    yield_value: Option<Decimal>,
    soil: Option<&SoilReading>,
) -> Vec<ScheduleEntry> {
    let (Some(yield_value), Some(soil)) = (yield_value, soil) else {
        return Vec::new();
    };

    let fertilizer = fertilizer_needs(soil).join(", ");
    let irrigation = irrigation_cadence(yield_value);

    (1..=SCHEDULE_DAYS)
        .map(|day| {
            if day % 2 == 0 {
                ScheduleEntry {
                    day,
                    task: ScheduleTask::Irrigation,
                    notes: irrigation.to_string(),
                }
            } else {
                ScheduleEntry {
                    day,
                    task: ScheduleTask::Fertilization,
                    notes: fertilizer.clone(),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich_soil() -> SoilReading {
        SoilReading::new(
            Decimal::new(65, 1),
            Decimal::from(2),
            Decimal::ONE,
            Decimal::ONE,
        )
    }

    #[test]
    fn test_week_alternates_starting_with_fertilization() {
        let schedule = generate_schedule(Some(Decimal::from(5)), Some(&rich_soil()));
        assert_eq!(schedule.len(), 7);
        for (i, entry) in schedule.iter().enumerate() {
            assert_eq!(entry.day as usize, i + 1);
            let expected = if entry.day % 2 == 1 {
                ScheduleTask::Fertilization
            } else {
                ScheduleTask::Irrigation
            };
            assert_eq!(entry.task, expected);
        }
        assert_eq!(schedule[0].notes, "Balanced NPK fertilizer");
        assert_eq!(schedule[1].notes, "Every 2 days");
    }

    #[test]
    fn test_deficient_soil_lists_all_fertilizers() {
        let schedule = generate_schedule(Some(Decimal::from(8)), Some(&SoilReading::default()));
        assert_eq!(
            schedule[0].notes,
            "Nitrogen-rich fertilizer, Phosphate fertilizer, Potash fertilizer"
        );
        assert_eq!(schedule[1].notes, "Daily irrigation");
    }

    #[test]
    fn test_irrigation_cadence_boundaries() {
        assert_eq!(irrigation_cadence(Decimal::from(7)), "Every 2 days");
        assert_eq!(irrigation_cadence(Decimal::new(701, 2)), "Daily irrigation");
        assert_eq!(irrigation_cadence(Decimal::from(3)), "Every 3 days");
    }

    #[test]
    fn test_missing_inputs_give_empty_schedule() {
        assert!(generate_schedule(None, Some(&rich_soil())).is_empty());
        assert!(generate_schedule(Some(Decimal::ONE), None).is_empty());
    }

    #[test]
    fn test_task_display() {
        assert_eq!(ScheduleTask::Irrigation.to_string(), "Irrigation");
    }
}
