use fitlog_core::{errors::JournalResult, models::member::Member};

use super::{load_collection, save_collection};
use crate::store::KeyValueStore;

pub const MEMBERS_KEY: &str = "fitlog-members";

pub fn load_members<S: KeyValueStore + ?Sized>(store: &S) -> JournalResult<Vec<Member>> {
    load_collection(store, MEMBERS_KEY)
}

pub fn save_members<S: KeyValueStore + ?Sized>(store: &S, members: &[Member]) -> JournalResult<()> {
    save_collection(store, MEMBERS_KEY, members)
}
