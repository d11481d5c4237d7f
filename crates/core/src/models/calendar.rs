use chrono::NaiveDate;
use serde::Serialize;

/// One slot of the 42-cell month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
}

/// Coloured marker shown on a day for a single workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutIndicator {
    pub workout_id: i64,
    pub member_id: i64,
    pub color: String,
}

/// Presentation model of a grid cell after workouts have been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub in_current_month: bool,
    pub has_workout: bool,
    pub indicators: Vec<WorkoutIndicator>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub year: i32,
    /// Zero-based month, 0 = January.
    pub month: u32,
    pub title: String,
    pub cells: Vec<DayCell>,
}

/// What the detail view shows after a day with workouts is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutDetail {
    pub workout_id: i64,
    pub date: NaiveDate,
    pub nickname: String,
    pub member_found: bool,
    pub photo: String,
    pub date_label: String,
    pub workouts_on_day: usize,
}
