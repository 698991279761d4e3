//! barik-stats: trip, stop, streak and spending statistics over a card ledger.

pub mod ranking;
pub mod stats;
pub mod streaks;

pub use ranking::Tally;
pub use stats::{
    DayPartUsage, DetailedStats, MonthCount, MonthlySpending, MonthlyStops, MonthlyTrips,
    WeekdayUsage, compute_stats,
};
pub use streaks::{Streak, detect_streaks};
