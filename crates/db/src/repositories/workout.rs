use fitlog_core::{errors::JournalResult, models::workout::Workout};

use super::{load_collection, save_collection};
use crate::store::KeyValueStore;

pub const WORKOUTS_KEY: &str = "fitlog-workouts";

pub fn load_workouts<S: KeyValueStore + ?Sized>(store: &S) -> JournalResult<Vec<Workout>> {
    load_collection(store, WORKOUTS_KEY)
}

pub fn save_workouts<S: KeyValueStore + ?Sized>(
    store: &S,
    workouts: &[Workout],
) -> JournalResult<()> {
    save_collection(store, WORKOUTS_KEY, workouts)
}
