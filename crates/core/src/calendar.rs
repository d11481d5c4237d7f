//! # Calendar Engine
//!
//! Turns the member registry and the workout log into a navigable month view.
//! Everything here is a pure function of its inputs: the grid is rebuilt from
//! the source records on every render and nothing is cached between calls.
//!
//! ## Grid layout
//!
//! A month is always shown as 6 full weeks (42 cells). The first cell is the
//! week-start weekday on or before the 1st of the month, so a month whose 1st
//! falls on the week-start day has no leading cells. Cells outside the target
//! month are still emitted and flagged with `in_current_month = false`.
//!
//! ## Day resolution
//!
//! Workouts match a day by exact calendar-date equality. A day may hold any
//! number of workouts, including several from the same member; each one gets
//! its own indicator in insertion order.

use chrono::{Datelike, Days, NaiveDate};

use crate::dates::{WeekStart, YearMonth, human_date};
use crate::models::{
    calendar::{CalendarCell, DayCell, MonthView, WorkoutDetail, WorkoutIndicator},
    member::Member,
    workout::Workout,
};
use crate::palette::UNASSIGNED_COLOR;

/// Number of cells in a month grid (6 weeks).
pub const GRID_CELLS: usize = 42;

/// Nickname shown when a workout's member cannot be resolved.
pub const UNKNOWN_MEMBER_LABEL: &str = "Unknown member";

/// Builds the Sunday-first grid for `year` and zero-based `month`.
///
/// `month` may lie outside `0..=11`; it is rolled into the adjacent year.
pub fn build_grid(year: i32, month: i32) -> Vec<CalendarCell> {
    build_grid_for(YearMonth::new(year, month), WeekStart::Sunday)
}

/// Builds the grid for `target` with rows starting on `week_start`.
pub fn build_grid_for(target: YearMonth, week_start: WeekStart) -> Vec<CalendarCell> {
    let first = target.first_day();
    let leading = first.weekday().days_since(week_start.weekday());
    let start = first
        .checked_sub_days(Days::new(u64::from(leading)))
        .unwrap_or(first);

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| CalendarCell {
            date,
            in_current_month: target.contains(date),
        })
        .collect()
}

/// All workouts logged on `date`, in insertion order.
pub fn workouts_on(date: NaiveDate, log: &[Workout]) -> Vec<&Workout> {
    log.iter().filter(|workout| workout.date == date).collect()
}

/// Looks up a member by id. `None` means the reference is dangling.
pub fn resolve_member(member_id: i64, registry: &[Member]) -> Option<&Member> {
    registry.iter().find(|member| member.id == member_id)
}

fn indicator_for(workout: &Workout, registry: &[Member]) -> WorkoutIndicator {
    let color = resolve_member(workout.member_id, registry)
        .map(|member| member.color.clone())
        .unwrap_or_else(|| UNASSIGNED_COLOR.to_string());

    WorkoutIndicator {
        workout_id: workout.id,
        member_id: workout.member_id,
        color,
    }
}

/// Resolves one grid cell into its presentation model.
pub fn day_cell(cell: CalendarCell, registry: &[Member], log: &[Workout]) -> DayCell {
    let indicators: Vec<WorkoutIndicator> = workouts_on(cell.date, log)
        .into_iter()
        .map(|workout| indicator_for(workout, registry))
        .collect();

    DayCell {
        date: cell.date,
        day: cell.date.day(),
        in_current_month: cell.in_current_month,
        has_workout: !indicators.is_empty(),
        indicators,
    }
}

/// Renders the month at `cursor` from the current registry and log.
pub fn render_month(
    cursor: YearMonth,
    week_start: WeekStart,
    registry: &[Member],
    log: &[Workout],
) -> MonthView {
    let cells = build_grid_for(cursor, week_start)
        .into_iter()
        .map(|cell| day_cell(cell, registry, log))
        .collect();

    MonthView {
        year: cursor.year(),
        month: cursor.month0(),
        title: cursor.title(),
        cells,
    }
}

/// Detail view for a clicked day.
///
/// Shows the first workout logged on `date`; returns `None` when the day has
/// no workouts, which callers treat as a no-op.
pub fn day_detail(date: NaiveDate, registry: &[Member], log: &[Workout]) -> Option<WorkoutDetail> {
    let day_workouts = workouts_on(date, log);
    let first = day_workouts.first()?;
    let member = resolve_member(first.member_id, registry);

    Some(WorkoutDetail {
        workout_id: first.id,
        date,
        nickname: member
            .map(|m| m.nickname.clone())
            .unwrap_or_else(|| UNKNOWN_MEMBER_LABEL.to_string()),
        member_found: member.is_some(),
        photo: first.photo.clone(),
        date_label: human_date(date),
        workouts_on_day: day_workouts.len(),
    })
}
