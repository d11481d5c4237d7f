//! # Journal Controller
//!
//! Owns the application state (member registry, workout log, calendar cursor)
//! and applies user actions to it. Each action maps to one named operation;
//! mutations are persisted immediately and the month view is always rebuilt
//! from the source records.
//!
//! ## Adding a workout
//!
//! Workout submission is split around the photo read, the only asynchronous
//! step:
//!
//! 1. The form fields are validated synchronously. A rejected form leaves the
//!    state and the store untouched.
//! 2. The photo read is started in the background and a ticket is returned.
//! 3. `next_completed` picks up finished reads in completion order, appends the
//!    workout and persists the log.
//!
//! Several submissions may be in flight at once. They are appended in the order
//! their reads finish, not the order they were submitted.
//!
//! Reads are never cancelled. Dropping a [`Journal`] with reads still pending
//! detaches them: they run to completion in the background, but their results
//! are discarded and nothing is persisted for them.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use fitlog_core::{
    calendar::{day_detail, render_month},
    dates::{WeekStart, YearMonth, parse_date_key, timestamp},
    errors::{JournalError, JournalResult},
    ids::IdGenerator,
    models::{
        calendar::{MonthView, WorkoutDetail},
        member::{Member, MemberOption, MemberSummary},
        workout::Workout,
    },
    palette::assign_color,
};
use fitlog_db::{
    KeyValueStore,
    repositories::{
        member::{load_members, save_members},
        quarantine,
        workout::{load_workouts, save_workouts},
    },
};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::CorruptionPolicy;
use crate::photo::PhotoReader;

/// Raw fields of the add-workout form, as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutForm {
    pub member_id: String,
    pub date: String,
    pub photo: Option<PathBuf>,
}

/// A user action dispatched onto the journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddMember { nickname: String },
    AddWorkout(WorkoutForm),
    PrevMonth,
    NextMonth,
    ShowMonth(YearMonth),
    SelectDay(NaiveDate),
}

/// Result of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    MemberAdded(Member),
    /// The photo read has started; the workout is appended once it completes.
    WorkoutQueued { ticket: u64 },
    MonthChanged(MonthView),
    /// `None` when the selected day has no workouts.
    DayDetail(Option<WorkoutDetail>),
}

/// Journal options that do not come from the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct JournalOptions {
    pub week_start: WeekStart,
    pub on_corrupt: CorruptionPolicy,
}

/// Member registry and workout log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalState {
    pub members: Vec<Member>,
    pub workouts: Vec<Workout>,
}

/// Validated workout fields waiting for their photo.
#[derive(Debug)]
struct Submission {
    ticket: u64,
    member_id: i64,
    date: NaiveDate,
}

#[derive(Debug)]
struct Ingested {
    submission: Submission,
    photo: JournalResult<String>,
}

/// Finished photo read, as reported by [`Journal::next_completed`].
#[derive(Debug)]
pub struct Completed {
    pub ticket: u64,
    pub result: JournalResult<Workout>,
}

/// The application state plus the store it is persisted to.
///
/// See the module docs for what happens to photo reads pending on drop.
pub struct Journal<S: KeyValueStore> {
    store: S,
    state: JournalState,
    cursor: YearMonth,
    week_start: WeekStart,
    member_ids: IdGenerator,
    workout_ids: IdGenerator,
    photos: Arc<dyn PhotoReader>,
    ingesting: JoinSet<Ingested>,
    next_ticket: u64,
}

fn recover<T, S>(
    loaded: JournalResult<Vec<T>>,
    store: &S,
    policy: CorruptionPolicy,
) -> JournalResult<Vec<T>>
where
    S: KeyValueStore,
{
    match loaded {
        Err(JournalError::Corrupted { key, source }) if policy == CorruptionPolicy::Reset => {
            warn!("Stored data under {} is unreadable ({}), starting empty", key, source);
            quarantine(store, &key)?;
            Ok(Vec::new())
        }
        other => other,
    }
}

impl<S: KeyValueStore> Journal<S> {
    /// Loads the journal from `store`, applying the corruption policy to
    /// collections that fail to parse.
    pub fn open(
        store: S,
        photos: Arc<dyn PhotoReader>,
        options: JournalOptions,
    ) -> JournalResult<Self> {
        let members = recover(load_members(&store), &store, options.on_corrupt)?;
        let workouts = recover(load_workouts(&store), &store, options.on_corrupt)?;

        info!(
            "Opened journal with {} members and {} workouts",
            members.len(),
            workouts.len()
        );

        Ok(Self {
            member_ids: IdGenerator::after(members.iter().map(|m| m.id)),
            workout_ids: IdGenerator::after(workouts.iter().map(|w| w.id)),
            state: JournalState { members, workouts },
            store,
            cursor: YearMonth::current(),
            week_start: options.week_start,
            photos,
            ingesting: JoinSet::new(),
            next_ticket: 1,
        })
    }

    pub fn state(&self) -> &JournalState {
        &self.state
    }

    pub fn members(&self) -> &[Member] {
        &self.state.members
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.state.workouts
    }

    pub fn cursor(&self) -> YearMonth {
        self.cursor
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of photo reads still running.
    pub fn pending(&self) -> usize {
        self.ingesting.len()
    }

    pub fn dispatch(&mut self, action: Action) -> JournalResult<Outcome> {
        debug!("Dispatching {:?}", action);
        match action {
            Action::AddMember { nickname } => self.add_member(&nickname).map(Outcome::MemberAdded),
            Action::AddWorkout(form) => self
                .submit_workout(form)
                .map(|ticket| Outcome::WorkoutQueued { ticket }),
            Action::PrevMonth => Ok(Outcome::MonthChanged(self.prev_month())),
            Action::NextMonth => Ok(Outcome::MonthChanged(self.next_month())),
            Action::ShowMonth(month) => Ok(Outcome::MonthChanged(self.show_month(month))),
            Action::SelectDay(date) => Ok(Outcome::DayDetail(self.select_day(date))),
        }
    }

    /// Registers a member. The nickname is trimmed and must be non-empty and
    /// not already taken (exact, case-sensitive match).
    pub fn add_member(&mut self, nickname: &str) -> JournalResult<Member> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(JournalError::Validation("Please enter a nickname".to_string()));
        }
        if self.state.members.iter().any(|m| m.nickname == nickname) {
            return Err(JournalError::Validation(format!(
                "Nickname '{}' is already taken",
                nickname
            )));
        }

        let now = Utc::now();
        let member = Member {
            id: self.member_ids.next_id(now),
            nickname: nickname.to_string(),
            color: assign_color(self.state.members.len()).to_string(),
            created_at: timestamp(now),
        };

        self.state.members.push(member.clone());
        if let Err(e) = save_members(&self.store, &self.state.members) {
            self.state.members.pop();
            return Err(e);
        }

        info!("Registered member {} ({}) with colour {}", member.nickname, member.id, member.color);
        Ok(member)
    }

    fn validate_workout(&self, form: &WorkoutForm) -> JournalResult<(i64, NaiveDate, PathBuf)> {
        let member_id = form.member_id.trim();
        let date = form.date.trim();
        let photo = form.photo.as_ref().filter(|p| !p.as_os_str().is_empty());

        let (Some(photo), false, false) = (photo, member_id.is_empty(), date.is_empty()) else {
            return Err(JournalError::Validation("Please fill in all fields".to_string()));
        };

        let member_id: i64 = member_id
            .parse()
            .map_err(|_| JournalError::Validation(format!("Invalid member id '{}'", member_id)))?;
        if !self.state.members.iter().any(|m| m.id == member_id) {
            return Err(JournalError::NotFound(format!("Member {}", member_id)));
        }

        let date = parse_date_key(date).ok_or_else(|| {
            JournalError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", date))
        })?;

        Ok((member_id, date, photo.clone()))
    }

    /// Validates the form and starts reading its photo in the background.
    ///
    /// Must be called from within a Tokio runtime. Returns the ticket that the
    /// matching [`Completed`] will carry.
    pub fn submit_workout(&mut self, form: WorkoutForm) -> JournalResult<u64> {
        let (member_id, date, photo_path) = self.validate_workout(&form)?;

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let reader = Arc::clone(&self.photos);
        let submission = Submission {
            ticket,
            member_id,
            date,
        };
        debug!("Reading photo {} for ticket {}", photo_path.display(), ticket);
        self.ingesting.spawn(async move {
            // A panicking reader must still report against its own ticket.
            let read = tokio::spawn(async move { reader.read_data_uri(&photo_path).await });
            let photo = match read.await {
                Ok(photo) => photo,
                Err(e) => Err(JournalError::PhotoIngestion(format!("photo read failed: {}", e))),
            };
            Ingested { submission, photo }
        });

        Ok(ticket)
    }

    /// Waits for the next photo read to finish and applies it.
    ///
    /// Returns `None` once no reads are pending.
    pub async fn next_completed(&mut self) -> Option<Completed> {
        loop {
            match self.ingesting.join_next().await? {
                Ok(Ingested { submission, photo }) => {
                    if let Err(e) = &photo {
                        warn!("Photo for ticket {} was not ingested: {}", submission.ticket, e);
                    }
                    return Some(Completed {
                        ticket: submission.ticket,
                        result: photo.and_then(|photo| self.append_workout(&submission, photo)),
                    });
                }
                // Read failures are caught inside the task; this is only reached
                // when the runtime is shutting down.
                Err(e) => warn!("Photo ingestion task ended without a result: {}", e),
            }
        }
    }

    /// Waits for every pending photo read, in completion order.
    pub async fn drain(&mut self) -> Vec<Completed> {
        let mut done = Vec::with_capacity(self.pending());
        while let Some(completed) = self.next_completed().await {
            done.push(completed);
        }
        done
    }

    fn append_workout(&mut self, submission: &Submission, photo: String) -> JournalResult<Workout> {
        let now = Utc::now();
        let workout = Workout {
            id: self.workout_ids.next_id(now),
            member_id: submission.member_id,
            date: submission.date,
            photo,
            created_at: timestamp(now),
        };

        self.state.workouts.push(workout.clone());
        if let Err(e) = save_workouts(&self.store, &self.state.workouts) {
            self.state.workouts.pop();
            return Err(e);
        }

        info!(
            "Logged workout {} for member {} on {}",
            workout.id, workout.member_id, workout.date
        );
        Ok(workout)
    }

    /// Reads a photo without logging a workout.
    pub async fn preview_photo(&self, path: &std::path::Path) -> JournalResult<String> {
        self.photos.read_data_uri(path).await
    }

    pub fn render(&self) -> MonthView {
        render_month(
            self.cursor,
            self.week_start,
            &self.state.members,
            &self.state.workouts,
        )
    }

    pub fn prev_month(&mut self) -> MonthView {
        self.show_month(self.cursor.prev())
    }

    pub fn next_month(&mut self) -> MonthView {
        self.show_month(self.cursor.next())
    }

    pub fn show_month(&mut self, month: YearMonth) -> MonthView {
        self.cursor = month;
        self.render()
    }

    /// Detail of the first workout on `date`, or `None` for an empty day.
    pub fn select_day(&self, date: NaiveDate) -> Option<WorkoutDetail> {
        let detail = day_detail(date, &self.state.members, &self.state.workouts);
        if let Some(detail) = &detail {
            if !detail.member_found {
                warn!("Workout {} references a missing member", detail.workout_id);
            }
        }
        detail
    }

    pub fn member_summaries(&self) -> Vec<MemberSummary> {
        self.state.members.iter().map(MemberSummary::from).collect()
    }

    pub fn member_options(&self) -> Vec<MemberOption> {
        self.state.members.iter().map(MemberOption::from).collect()
    }
}

impl<S: KeyValueStore> Drop for Journal<S> {
    fn drop(&mut self) {
        if !self.ingesting.is_empty() {
            warn!(
                "Journal dropped with {} photo reads pending, their results will be discarded",
                self.ingesting.len()
            );
            self.ingesting.detach_all();
        }
    }
}
