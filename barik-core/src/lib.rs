//! barik-core: transaction record, calendar keys and locale tables shared by
//! the statement ingester and the statistics engine.

pub mod calendar;
pub mod locale;
pub mod transaction;

pub use calendar::{DayPart, MonthKey, day_label, weekday_index};
pub use locale::{Language, Locale};
pub use transaction::{Transaction, UNKNOWN_OPERATOR, is_trip_kind};
