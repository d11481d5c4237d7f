pub mod calendar;
pub mod member;
pub mod workout;
