//! Plain-text views for the terminal front-end.

use fitlog_core::{
    calendar::{UNKNOWN_MEMBER_LABEL, resolve_member},
    dates::{WeekStart, date_key},
    models::{
        calendar::{MonthView, WorkoutDetail},
        member::{Member, MemberSummary},
    },
};

const CELL_WIDTH: usize = 6;
const PHOTO_PREVIEW_CHARS: usize = 40;

fn cell_text(day: u32, in_current_month: bool, workouts: usize) -> String {
    let prefix = if in_current_month { ' ' } else { '.' };
    let marks = if workouts > 0 { format!("*{}", workouts) } else { String::new() };
    format!("{}{:>2}{:<3}", prefix, day, marks)
}

// Joins lines with a trailing newline after each one.
fn block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Renders the month grid followed by the list of days that have workouts.
///
/// Days outside the displayed month are prefixed with `.`, and `*n` marks a day
/// with `n` workouts.
pub fn month_text(view: &MonthView, week_start: WeekStart, members: &[Member]) -> String {
    let width = CELL_WIDTH * 7 + 6;
    let mut lines = vec![format!("{:^width$}", view.title, width = width)];

    let header: Vec<String> = week_start
        .header()
        .iter()
        .map(|name| format!("{:^w$}", name, w = CELL_WIDTH))
        .collect();
    lines.push(header.join(" "));

    lines.extend(view.cells.chunks(7).map(|week| {
        let row: Vec<String> = week
            .iter()
            .map(|cell| cell_text(cell.day, cell.in_current_month, cell.indicators.len()))
            .collect();
        row.join(" ").trim_end().to_string()
    }));

    let active: Vec<_> = view.cells.iter().filter(|cell| cell.has_workout).collect();
    if !active.is_empty() {
        lines.push(String::new());
        lines.extend(active.into_iter().map(|cell| {
            let names: Vec<String> = cell
                .indicators
                .iter()
                .map(|indicator| {
                    let name = resolve_member(indicator.member_id, members)
                        .map(|m| m.nickname.as_str())
                        .unwrap_or(UNKNOWN_MEMBER_LABEL);
                    format!("{} [{}]", name, indicator.color)
                })
                .collect();
            format!("{}  {}", date_key(cell.date), names.join(", "))
        }));
    }

    block(lines)
}

pub fn detail_text(detail: &WorkoutDetail) -> String {
    let preview: String = detail.photo.chars().take(PHOTO_PREVIEW_CHARS).collect();
    let ellipsis = if detail.photo.chars().count() > PHOTO_PREVIEW_CHARS { "..." } else { "" };

    let mut lines = vec![
        format!("{}'s workout", detail.nickname),
        format!("Logged on {}.", detail.date_label),
        format!("Photo: {}{} ({} bytes)", preview, ellipsis, detail.photo.len()),
    ];
    if detail.workouts_on_day > 1 {
        lines.push(format!(
            "{} more workout(s) logged that day.",
            detail.workouts_on_day - 1
        ));
    }
    block(lines)
}

pub fn members_text(members: &[MemberSummary]) -> String {
    if members.is_empty() {
        return "No members registered yet.\n".to_string();
    }

    block(
        members
            .iter()
            .map(|member| {
                format!(
                    "{:>15}  {:<20} {}  joined {}",
                    member.id, member.nickname, member.color, member.joined_on
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fitlog_core::{
        calendar::render_month,
        dates::YearMonth,
        models::workout::Workout,
        palette::PALETTE,
    };
    use pretty_assertions::assert_eq;

    fn fixtures() -> (Vec<Member>, Vec<Workout>) {
        let created_at = "2024-03-01T00:00:00.000Z".to_string();
        let members = vec![Member {
            id: 1,
            nickname: "A".to_string(),
            color: PALETTE[0].to_string(),
            created_at: created_at.clone(),
        }];
        let workouts = vec![
            Workout {
                id: 10,
                member_id: 1,
                date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                photo: "x".to_string(),
                created_at: created_at.clone(),
            },
            Workout {
                id: 11,
                member_id: 9,
                date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                photo: "y".to_string(),
                created_at,
            },
        ];
        (members, workouts)
    }

    #[test]
    fn cells_mark_outside_days_and_counts() {
        assert_eq!(cell_text(5, true, 0), "  5   ");
        assert_eq!(cell_text(28, false, 0), ".28   ");
        assert_eq!(cell_text(15, true, 2), " 15*2 ");
    }

    #[test]
    fn month_text_lists_active_days() {
        let (members, workouts) = fixtures();
        let view = render_month(YearMonth::new(2024, 2), WeekStart::Sunday, &members, &workouts);
        let text = month_text(&view, WeekStart::Sunday, &members);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].trim(), "March 2024");
        assert!(lines[1].trim_start().starts_with("Sun"));
        // title, header, six weeks, blank line, one active day
        assert_eq!(lines.len(), 10);
        assert!(text.ends_with('\n'));
        assert_eq!(lines[8], "");
        assert_eq!(
            lines[9],
            format!("2024-03-15  A [{}], Unknown member [#C8C8C8]", PALETTE[0])
        );
    }

    #[test]
    fn detail_text_mentions_extra_workouts() {
        let (members, workouts) = fixtures();
        let detail = fitlog_core::calendar::day_detail(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            &members,
            &workouts,
        )
        .unwrap();

        let text = detail_text(&detail);
        assert!(text.starts_with("A's workout"));
        assert!(text.contains("Photo: x (1 bytes)"));
        assert!(text.contains("1 more workout(s)"));
        assert!(text.ends_with(".\n"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn member_rows_end_with_newlines() {
        let (members, _) = fixtures();
        let summaries: Vec<MemberSummary> = members.iter().map(MemberSummary::from).collect();
        let text = members_text(&summaries);

        assert_eq!(
            text,
            format!("{:>15}  {:<20} {}  joined 2024-03-01\n", 1, "A", PALETTE[0])
        );
    }

    #[test]
    fn empty_member_list() {
        assert_eq!(members_text(&[]), "No members registered yet.\n");
    }
}
