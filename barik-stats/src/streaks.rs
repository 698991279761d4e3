//! Consecutive-day streak detection over the days that have trips.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ranking::Tally;

/// A maximal run of calendar-consecutive days with at least one trip each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub days: usize,
    pub trips: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// All streaks, longest first; equal lengths are ordered by trip count, then
/// chronologically.
pub fn detect_streaks(trips_by_day: &Tally<NaiveDate, usize>) -> Vec<Streak> {
    let days: BTreeSet<NaiveDate> = trips_by_day.iter().map(|(d, _)| *d).collect();

    let mut streaks: Vec<Streak> = Vec::new();
    let mut current: Option<Streak> = None;

    for day in days {
        let trips = trips_by_day.get(&day);
        current = match current.take() {
            Some(mut s) if s.end.succ_opt() == Some(day) => {
                s.days += 1;
                s.trips += trips;
                s.end = day;
                Some(s)
            }
            previous => {
                streaks.extend(previous);
                Some(Streak {
                    days: 1,
                    trips,
                    start: day,
                    end: day,
                })
            }
        };
    }
    streaks.extend(current);

    streaks.sort_by(|a, b| b.days.cmp(&a.days).then(b.trips.cmp(&a.trips)));
    streaks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn tally(days: &[(NaiveDate, usize)]) -> Tally<NaiveDate, usize> {
        let mut t = Tally::default();
        for (day, n) in days {
            t.add(*day, *n);
        }
        t
    }

    #[test]
    fn test_gap_splits_streaks() {
        let t = tally(&[
            (d(2025, 3, 1), 2),
            (d(2025, 3, 2), 1),
            (d(2025, 3, 3), 3),
            (d(2025, 3, 6), 4),
        ]);
        let streaks = detect_streaks(&t);
        assert_eq!(
            streaks,
            vec![
                Streak { days: 3, trips: 6, start: d(2025, 3, 1), end: d(2025, 3, 3) },
                Streak { days: 1, trips: 4, start: d(2025, 3, 6), end: d(2025, 3, 6) },
            ]
        );
    }

    #[test]
    fn test_crosses_month_and_year_boundaries() {
        let t = tally(&[(d(2025, 1, 1), 1), (d(2024, 12, 31), 1), (d(2024, 12, 30), 1)]);
        let streaks = detect_streaks(&t);
        assert_eq!(streaks.len(), 1);
        assert_eq!(streaks[0].start, d(2024, 12, 30));
        assert_eq!(streaks[0].end, d(2025, 1, 1));
        assert_eq!(streaks[0].days, 3);
    }

    #[test]
    fn test_equal_length_ordered_by_trips_then_date() {
        let t = tally(&[
            (d(2025, 5, 1), 1),
            (d(2025, 5, 10), 5),
            (d(2025, 5, 20), 1),
        ]);
        let starts: Vec<_> = detect_streaks(&t).iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![d(2025, 5, 10), d(2025, 5, 1), d(2025, 5, 20)]);
    }

    #[test]
    fn test_no_days_no_streaks() {
        assert!(detect_streaks(&Tally::default()).is_empty());
    }
}
