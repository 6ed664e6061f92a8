//! Timesheet arithmetic
//!
//! Pure functions over already-loaded entries: weekly summary, pending
//! weeks and the hours rule.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::db::models::{EntryStatus, PendingWeek, TimesheetEntry, WeeklySummary};
use crate::utils::time::{format_date, parse_date, round_to, week_bounds};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Hours of one entry must be in (0, 24]
pub fn check_hours(hours: f64) -> AppResult<()> {
    if hours.is_finite() && hours > 0.0 && hours <= 24.0 {
        Ok(())
    } else {
        Err(AppError::with_message(
            ErrorCode::InvalidHours,
            format!("Hours must be greater than 0 and at most 24, got {hours}"),
        ))
    }
}

/// Parse any day of a week and return its `(monday, sunday)` as strings
pub fn normalize_week(day: &str) -> AppResult<(String, String)> {
    let (monday, sunday) = week_bounds(parse_date(day)?);
    Ok((format_date(monday), format_date(sunday)))
}

/// Totals for the week starting `monday`; entries outside it are ignored
pub fn weekly_summary(monday: NaiveDate, entries: &[TimesheetEntry]) -> WeeklySummary {
    let (start, end) = week_bounds(monday);
    let (start, end) = (format_date(start), format_date(end));

    let mut total = 0.0;
    let mut billable = 0.0;
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut daily: BTreeMap<String, f64> = BTreeMap::new();

    for e in entries
        .iter()
        .filter(|e| e.date.as_str() >= start.as_str() && e.date.as_str() <= end.as_str())
    {
        total += e.hours;
        if e.is_billable {
            billable += e.hours;
        }
        *by_status.entry(e.status.as_str().to_string()).or_default() += 1;
        *daily.entry(e.date.clone()).or_default() += e.hours;
    }

    let percentage = if total > 0.0 {
        round_to(billable / total * 100.0, 2)
    } else {
        0.0
    };

    WeeklySummary {
        week_start: start,
        week_end: end,
        total_hours: round_to(total, 2),
        billable_hours: round_to(billable, 2),
        non_billable_hours: round_to(total - billable, 2),
        billable_percentage: percentage,
        entries_by_status: by_status,
        daily_hours: daily.into_iter().map(|(d, h)| (d, round_to(h, 2))).collect(),
    }
}

/// Group submitted entries by `(user, week)`, oldest week first
pub fn pending_weeks(entries: &[TimesheetEntry]) -> Vec<PendingWeek> {
    let mut weeks: BTreeMap<(String, String), PendingWeek> = BTreeMap::new();
    for e in entries.iter().filter(|e| e.status == EntryStatus::Submitted) {
        let Ok((start, end)) = normalize_week(&e.date) else {
            continue;
        };
        let week = weeks
            .entry((start.clone(), e.user_id.clone()))
            .or_insert_with(|| PendingWeek {
                user_id: e.user_id.clone(),
                week_start: start,
                week_end: end,
                total_hours: 0.0,
                entries: 0,
            });
        week.total_hours = round_to(week.total_hours + e.hours, 2);
        week.entries += 1;
    }
    weeks.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(user: &str, date: &str, hours: f64, billable: bool, status: EntryStatus) -> TimesheetEntry {
        TimesheetEntry {
            id: String::new(),
            user_id: user.into(),
            tenant_id: None,
            project_id: "p1".into(),
            task_id: None,
            date: date.into(),
            hours,
            description: None,
            is_billable: billable,
            status,
            submitted_at: None,
            decided_by: None,
            decided_at: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_summary_split() {
        let monday = parse_date("2024-03-11").unwrap();
        let entries = vec![
            entry("u", "2024-03-11", 3.0, true, EntryStatus::Draft),
            entry("u", "2024-03-12", 2.0, false, EntryStatus::Submitted),
        ];
        let summary = weekly_summary(monday, &entries);
        assert_eq!(summary.total_hours, 5.0);
        assert_eq!(summary.billable_hours, 3.0);
        assert_eq!(summary.non_billable_hours, 2.0);
        assert_eq!(summary.billable_percentage, 60.0);
        assert_eq!(summary.entries_by_status["draft"], 1);
        assert_eq!(summary.daily_hours["2024-03-12"], 2.0);
        assert_eq!(summary.week_end, "2024-03-17");
    }

    #[test]
    fn test_empty_week_has_zero_percentage() {
        let summary = weekly_summary(parse_date("2024-03-11").unwrap(), &[]);
        assert_eq!(summary.total_hours, 0.0);
        assert_eq!(summary.billable_percentage, 0.0);
    }

    #[test]
    fn test_percentage_rounds_to_two_places() {
        let entries = vec![
            entry("u", "2024-03-11", 1.0, true, EntryStatus::Draft),
            entry("u", "2024-03-11", 2.0, false, EntryStatus::Draft),
        ];
        let summary = weekly_summary(parse_date("2024-03-11").unwrap(), &entries);
        assert_eq!(summary.billable_percentage, 33.33);
    }

    #[test]
    fn test_pending_groups_by_user_and_week() {
        let entries = vec![
            entry("u1", "2024-03-11", 4.0, true, EntryStatus::Submitted),
            entry("u1", "2024-03-13", 4.5, true, EntryStatus::Submitted),
            entry("u1", "2024-03-19", 1.0, true, EntryStatus::Submitted),
            entry("u2", "2024-03-12", 8.0, true, EntryStatus::Submitted),
            entry("u2", "2024-03-12", 8.0, true, EntryStatus::Approved),
        ];
        let weeks = pending_weeks(&entries);
        assert_eq!(weeks.len(), 3);
        assert_eq!(weeks[0].user_id, "u1");
        assert_eq!(weeks[0].total_hours, 8.5);
        assert_eq!(weeks[0].entries, 2);
        assert_eq!(weeks[1].user_id, "u2");
        assert_eq!(weeks[2].week_start, "2024-03-18");
    }

    #[test]
    fn test_hours_bounds() {
        assert!(check_hours(0.25).is_ok());
        assert!(check_hours(24.0).is_ok());
        assert!(check_hours(0.0).is_err());
        assert!(check_hours(24.5).is_err());
        assert!(check_hours(-1.0).is_err());
    }
}
