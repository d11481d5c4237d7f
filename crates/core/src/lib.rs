//! # fitlog core
//!
//! Domain types and the calendar engine of the fitness journal: member colour
//! assignment, the 42-cell month grid, and resolution of workouts onto days.
//! Nothing in this crate performs I/O.

pub mod calendar;
pub mod dates;
pub mod errors;
pub mod ids;
pub mod models;
pub mod palette;
