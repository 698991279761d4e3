//! Plain-text rendering of the statistics for the terminal.

use barik_core::Transaction;
use barik_stats::DetailedStats;
use std::fmt::Write;

pub fn euros(amount: f64) -> String {
    format!("{amount:.2} €")
}

pub fn render_stats(stats: &DetailedStats) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_stats(&mut out, stats)?;
    Ok(out)
}

fn write_stats(out: &mut String, s: &DetailedStats) -> std::fmt::Result {
    writeln!(out, "# Trips\n")?;
    writeln!(out, "Total trips: {}", s.trip_count)?;
    if let Some((day, n)) = s.sorted_days.first() {
        writeln!(out, "Busiest day: {day} ({n})")?;
    }
    if let Some(m) = s.sorted_months.first() {
        writeln!(out, "Busiest month: {} ({})", m.name, m.count)?;
    }

    writeln!(out, "\n## Top days\n")?;
    for (day, n) in &s.sorted_days {
        writeln!(out, "- {day}: {n}")?;
    }

    writeln!(out, "\n## Top months\n")?;
    for m in &s.sorted_months {
        writeln!(out, "- {}: {}", m.name, m.count)?;
    }

    writeln!(out, "\n## Monthly trips\n")?;
    for m in &s.chronological_trips {
        writeln!(out, "- {}: {}", m.name, m.trips)?;
    }

    writeln!(out, "\n# Stops\n")?;
    for (i, (stop, n)) in s.top_stops_all.iter().enumerate() {
        writeln!(out, "{:>2}. {stop} ({n})", i + 1)?;
    }
    for m in &s.top_stops_monthly {
        let stops: Vec<String> = m.stops.iter().map(|(stop, n)| format!("{stop} ({n})")).collect();
        writeln!(out, "- {}: {}", m.month, stops.join(", "))?;
    }

    writeln!(out, "\n# Operators\n")?;
    for (op, n) in &s.top_operators {
        writeln!(out, "- {op}: {n}")?;
    }

    writeln!(out, "\n# Streaks\n")?;
    writeln!(out, "Longest: {} days, {} trips", s.max_streak, s.max_streak_trips)?;
    for st in &s.streak_list {
        writeln!(out, "- {} → {}: {} days, {} trips", st.start, st.end, st.days, st.trips)?;
    }

    writeln!(out, "\n# Time of day\n")?;
    for p in &s.time_of_day {
        writeln!(out, "- {}: {}", p.name, p.value)?;
    }
    writeln!(out, "\n# Weekdays\n")?;
    for w in &s.weekday_usage {
        writeln!(out, "- {}: {}", w.name, w.value)?;
    }

    writeln!(out, "\n# Money\n")?;
    writeln!(out, "Total: {}", euros(s.total_spent))?;
    for m in &s.monthly_spending_list {
        writeln!(out, "- {}: {}", m.name, euros(m.amount))?;
    }
    writeln!(out, "\nTop days:")?;
    for (day, amount) in &s.top_spending_days {
        writeln!(out, "- {day}: {}", euros(*amount))?;
    }
    writeln!(out, "\nTop operators:")?;
    for (op, amount) in &s.top_spending_operators {
        writeln!(out, "- {op}: {}", euros(*amount))?;
    }

    Ok(())
}

pub fn render_ledger(ledger: &[Transaction]) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    for tx in ledger {
        writeln!(
            out,
            "{:>6} | {} | {:<20} | {:<20} | {} | {:>9} | {:>9}",
            tx.id,
            tx.date.format("%d/%m/%Y %H:%M:%S"),
            tx.kind,
            tx.operator,
            tx.location,
            euros(tx.amount),
            euros(tx.balance),
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use barik_core::locale::ES;
    use barik_stats::compute_stats;
    use chrono::NaiveDate;

    fn ledger() -> Vec<Transaction> {
        let at = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
        vec![Transaction::new(1, at, "VALIDACIONENTRADA", "Metro Bilbao", "Abando", -1.35, 18.65)]
    }

    #[test]
    fn test_euros() {
        assert_eq!(euros(-1.35), "-1.35 €");
        assert_eq!(euros(0.0), "0.00 €");
    }

    #[test]
    fn test_render_stats_sections() {
        let text = render_stats(&compute_stats(&ledger(), &ES)).unwrap();
        assert!(text.contains("Total trips: 1"));
        assert!(text.contains("Busiest day: 1/3/2025 (1)"));
        assert!(text.contains(" 1. Abando (1)"));
        assert!(text.contains("Total: -1.35 €"));
        assert!(text.contains("- Sáb: 1"));
    }

    #[test]
    fn test_render_ledger_row() {
        let text = render_ledger(&ledger()).unwrap();
        assert!(text.contains("01/03/2025 08:00:00"));
        assert!(text.contains("Metro Bilbao"));
        assert!(text.contains("18.65 €"));
    }
}
