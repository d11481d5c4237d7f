use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated photo record tied to a member at creation time.
///
/// `date` is a local calendar date and serializes as `YYYY-MM-DD`. `photo` is
/// an opaque data URI that nothing in the calendar engine inspects, and
/// `created_at` is an informational timestamp kept as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: i64,
    pub member_id: i64,
    pub date: NaiveDate,
    pub photo: String,
    pub created_at: String,
}
