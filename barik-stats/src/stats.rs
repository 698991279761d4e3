//! Statistics engine: a pure function from a transaction ledger to the
//! aggregates shown in the report.
//!
//! Trip-based figures (counts, day/month rankings, operators, streaks,
//! time-of-day and weekday histograms) only look at trip transactions.
//! Money and stops look at every ledger entry.

use barik_core::{DayPart, Locale, MonthKey, Transaction, day_label, weekday_index};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ranking::Tally;
use crate::streaks::{Streak, detect_streaks};

pub const TOP_DAYS: usize = 5;
pub const TOP_MONTHS: usize = 5;
pub const TOP_STOPS: usize = 10;
pub const TOP_STOPS_PER_MONTH: usize = 3;
pub const TOP_STREAKS: usize = 3;
pub const TOP_SPENDING_DAYS: usize = 5;
pub const TOP_SPENDING_OPERATORS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStops {
    pub month: String,
    pub stops: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySpending {
    pub name: String,
    pub amount: f64,
    pub month: MonthKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPartUsage {
    pub name: String,
    pub part: DayPart,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayUsage {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrips {
    pub name: String,
    pub trips: usize,
    pub month: MonthKey,
}

/// Everything the report shows, recomputed from scratch for each ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedStats {
    pub trip_count: usize,
    /// Top days by trips, labelled `d/m/yyyy`
    pub sorted_days: Vec<(String, usize)>,
    pub sorted_months: Vec<MonthCount>,
    pub top_stops_all: Vec<(String, usize)>,
    /// Newest month first
    pub top_stops_monthly: Vec<MonthlyStops>,
    /// Every operator with trips, most used first
    pub top_operators: Vec<(String, usize)>,
    pub max_streak: usize,
    pub max_streak_trips: usize,
    pub streak_list: Vec<Streak>,
    pub total_spent: f64,
    /// Oldest month first
    pub monthly_spending_list: Vec<MonthlySpending>,
    pub top_spending_days: Vec<(String, f64)>,
    pub top_spending_operators: Vec<(String, f64)>,
    pub operator_trips: IndexMap<String, usize>,
    pub time_of_day: Vec<DayPartUsage>,
    /// Sunday first
    pub weekday_usage: Vec<WeekdayUsage>,
    /// Oldest month first
    pub chronological_trips: Vec<MonthlyTrips>,
}

pub fn compute_stats(ledger: &[Transaction], locale: &Locale) -> DetailedStats {
    let trips: Vec<&Transaction> = ledger.iter().filter(|tx| tx.is_trip()).collect();

    // Trip buckets
    let mut trips_by_day: Tally<NaiveDate, usize> = Tally::default();
    let mut trips_by_month: Tally<MonthKey, usize> = Tally::default();
    let mut operator_trips: Tally<String, usize> = Tally::default();
    let mut day_parts = [0usize; 3];
    let mut weekdays = [0usize; 7];

    for tx in &trips {
        trips_by_day.add(tx.day(), 1);
        trips_by_month.add(tx.month(), 1);
        operator_trips.add(tx.operator.clone(), 1);
        day_parts[DayPart::of(tx.date).index()] += 1;
        weekdays[weekday_index(tx.day())] += 1;
    }

    let sorted_days = trips_by_day
        .top(TOP_DAYS)
        .into_iter()
        .map(|(day, n)| (day_label(day), n))
        .collect();

    let sorted_months = trips_by_month
        .top(TOP_MONTHS)
        .into_iter()
        .map(|(month, count)| MonthCount {
            name: locale.month_label(month),
            count,
        })
        .collect();

    let mut chronological_trips: Vec<MonthlyTrips> = trips_by_month
        .iter()
        .map(|(month, count)| MonthlyTrips {
            name: locale.short_month_label(*month),
            trips: *count,
            month: *month,
        })
        .collect();
    chronological_trips.sort_by_key(|m| m.month);

    let time_of_day = DayPart::ALL
        .iter()
        .map(|part| DayPartUsage {
            name: locale.day_part(*part).to_string(),
            part: *part,
            value: day_parts[part.index()],
        })
        .collect();

    let weekday_usage = weekdays
        .iter()
        .zip(locale.weekday_names.iter())
        .map(|(value, name)| WeekdayUsage {
            name: name.to_string(),
            value: *value,
        })
        .collect();

    // Stops, over every ledger entry
    let mut stops_all: Tally<String, usize> = Tally::default();
    let mut stops_by_month: IndexMap<MonthKey, Tally<String, usize>> = IndexMap::new();

    for tx in ledger {
        let Some(stop) = stop_key(&tx.location) else {
            continue;
        };
        stops_all.add(stop.to_string(), 1);
        stops_by_month
            .entry(tx.month())
            .or_default()
            .add(stop.to_string(), 1);
    }

    let top_stops_all = stops_all.top(TOP_STOPS);

    let mut monthly: Vec<(MonthKey, Vec<(String, usize)>)> = stops_by_month
        .iter()
        .map(|(month, stops)| (*month, stops.top(TOP_STOPS_PER_MONTH)))
        .collect();
    monthly.sort_by(|a, b| b.0.cmp(&a.0));
    let top_stops_monthly = monthly
        .into_iter()
        .map(|(month, stops)| MonthlyStops {
            month: locale.month_label(month),
            stops,
        })
        .collect();

    // Streaks
    let mut streak_list = detect_streaks(&trips_by_day);
    streak_list.truncate(TOP_STREAKS);
    let (max_streak, max_streak_trips) = streak_list
        .first()
        .map(|s| (s.days, s.trips))
        .unwrap_or((0, 0));

    // Money, over every ledger entry
    let mut total_spent = 0.0;
    let mut spending_by_month: Tally<MonthKey, f64> = Tally::default();
    let mut spending_by_day: Tally<NaiveDate, f64> = Tally::default();
    let mut spending_by_operator: Tally<String, f64> = Tally::default();

    for tx in ledger {
        total_spent += tx.amount;
        spending_by_month.add(tx.month(), tx.amount);
        spending_by_day.add(tx.day(), tx.amount);
        spending_by_operator.add(tx.operator.clone(), tx.amount);
    }

    let top_spending_days = spending_by_day
        .top(TOP_SPENDING_DAYS)
        .into_iter()
        .map(|(day, amount)| (day_label(day), amount))
        .collect();

    let top_spending_operators = spending_by_operator.top(TOP_SPENDING_OPERATORS);

    let mut monthly_spending_list: Vec<MonthlySpending> = spending_by_month
        .iter()
        .map(|(month, amount)| MonthlySpending {
            name: locale.month_label(*month),
            amount: *amount,
            month: *month,
        })
        .collect();
    monthly_spending_list.sort_by_key(|m| m.month);

    tracing::debug!(
        transactions = ledger.len(),
        trips = trips.len(),
        days = trips_by_day.len(),
        max_streak,
        "computed stats"
    );

    DetailedStats {
        trip_count: trips.len(),
        sorted_days,
        sorted_months,
        top_stops_all,
        top_stops_monthly,
        top_operators: operator_trips.ranked(),
        max_streak,
        max_streak_trips,
        streak_list,
        total_spent,
        monthly_spending_list,
        top_spending_days,
        top_spending_operators,
        operator_trips: operator_trips.into_map(),
        time_of_day,
        weekday_usage,
        chronological_trips,
    }
}

/// Trimmed location, or `None` when it is too short to be a stop name.
fn stop_key(location: &str) -> Option<&str> {
    let stop = location.trim();
    (stop.chars().count() >= 2).then_some(stop)
}
