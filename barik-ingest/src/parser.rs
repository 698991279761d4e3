//! Barik card statement row parser.
//!
//! Expected row shape after row reconstruction:
//!   Nº    FECHA TRANSACCION     TIPO               OPERADOR   EQUIPO/LUGAR   IMPORTE  SALDO
//!   1043  12/03/2025 08:14:55   VALIDACIONENTRADA  MB Metro   Abando         -1,35    23,10
//!
//! Long locations wrap onto dateless rows that are stitched back onto the
//! preceding transaction. The parser is a fold over the rows of one page:
//! [`StatementParser::step`] takes the page state and one line and returns
//! the new state plus the transaction it closed, if any.

use barik_core::{Transaction, UNKNOWN_OPERATOR};
use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::error::IngestError;
use crate::operators::find_operator;

/// Lower-cased substrings of header, footer and print artifact lines.
const BOILERPLATE_MARKERS: &[&str] = &[
    "tarjeta:",
    "fecha transaccion",
    "radamonedero",
    "dic 07, 2025",
];

/// Why a row produced nothing. Used for tracing and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Empty,
    MissingId,
    InvalidDate,
    MissingAmounts,
    Boilerplate,
}

/// Classification of a single row line.
#[derive(Debug, Clone, PartialEq)]
pub enum RowKind<'a> {
    /// A dated row with id, amount and balance
    Transaction(Transaction),
    /// A sale or top-up row. Not a trip; closes the pending transaction.
    BalanceOperation,
    /// Dateless wrapped text
    Continuation(&'a str),
    Noise(SkipReason),
}

/// Parser state for one page: the transaction still open for continuation lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pending: Option<Transaction>,
}

impl PageState {
    pub fn pending(&self) -> Option<&Transaction> {
        self.pending.as_ref()
    }

    /// Close the page, releasing the open transaction.
    pub fn finish(self) -> Option<Transaction> {
        self.pending
    }
}

/// Compiled row grammar.
#[derive(Debug, Clone)]
struct RowGrammar {
    /// DD/MM/YYYY HH:MM:SS
    datetime: Regex,
    /// digit run closing the text before the date
    trailing_id: Regex,
    /// comma-decimal money token
    amount: Regex,
    /// a line holding only DD/MM/YYYY
    bare_date: Regex,
    newlines: Regex,
}

impl RowGrammar {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            datetime: Regex::new(r"(\d{2})/(\d{2})/(\d{4})\s+(\d{2}):(\d{2}):(\d{2})")?,
            trailing_id: Regex::new(r"(\d+)$")?,
            amount: Regex::new(r"-?\d+,\d{2}")?,
            bare_date: Regex::new(r"^\d{2}/\d{2}/\d{4}$")?,
            newlines: Regex::new(r"[\n\r]+")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct StatementParser {
    grammar: RowGrammar,
    extra_boilerplate: Vec<String>,
}

impl StatementParser {
    pub fn new() -> Result<Self, IngestError> {
        Self::with_boilerplate(std::iter::empty::<String>())
    }

    /// Parser that also ignores continuation lines containing any of `markers`
    /// (case-insensitive).
    pub fn with_boilerplate<I, S>(markers: I) -> Result<Self, IngestError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            grammar: RowGrammar::new()?,
            extra_boilerplate: markers
                .into_iter()
                .map(|m| m.as_ref().trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        })
    }

    /// Parse the ordered row lines of one page.
    pub fn parse_page<I, S>(&self, lines: I) -> Vec<Transaction>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        let mut state = PageState::default();

        for line in lines {
            let (next, closed) = self.step(state, line.as_ref());
            state = next;
            out.extend(closed);
        }
        out.extend(state.finish());

        out
    }

    /// Advance the page fold by one row.
    pub fn step(&self, state: PageState, line: &str) -> (PageState, Option<Transaction>) {
        match self.classify(line) {
            RowKind::Transaction(tx) => (PageState { pending: Some(tx) }, state.pending),
            RowKind::BalanceOperation => (PageState::default(), state.pending),
            RowKind::Continuation(text) => match state.pending {
                Some(mut tx) => {
                    tx.append_location(text);
                    (PageState { pending: Some(tx) }, None)
                }
                None => {
                    tracing::trace!(line = text, "continuation without open transaction");
                    (PageState::default(), None)
                }
            },
            RowKind::Noise(reason) => {
                tracing::trace!(?reason, line, "skipping row");
                (state, None)
            }
        }
    }

    /// Classify one row line without looking at parser state.
    pub fn classify<'a>(&self, line: &'a str) -> RowKind<'a> {
        match self.grammar.datetime.captures(line) {
            Some(caps) => self.parse_dated(line, &caps),
            None => self.classify_dateless(line.trim()),
        }
    }

    fn parse_dated(&self, line: &str, caps: &Captures<'_>) -> RowKind<'static> {
        let Some(whole) = caps.get(0) else {
            return RowKind::Noise(SkipReason::InvalidDate);
        };

        let pre = line[..whole.start()].trim();
        let id = match self
            .grammar
            .trailing_id
            .captures(pre)
            .and_then(|c| c[1].parse::<u64>().ok())
        {
            Some(id) => id,
            None => return RowKind::Noise(SkipReason::MissingId),
        };

        let Some(date) = parse_datetime(caps) else {
            return RowKind::Noise(SkipReason::InvalidDate);
        };

        let post = line[whole.end()..].trim();
        let amounts: Vec<_> = self.grammar.amount.find_iter(post).collect();
        if amounts.len() < 2 {
            return RowKind::Noise(SkipReason::MissingAmounts);
        }
        let amount_match = amounts[amounts.len() - 2];
        let balance_match = amounts[amounts.len() - 1];
        let (Some(amount), Some(balance)) = (
            parse_decimal_comma(amount_match.as_str()),
            parse_decimal_comma(balance_match.as_str()),
        ) else {
            return RowKind::Noise(SkipReason::MissingAmounts);
        };

        let middle = post[..amount_match.start()].trim();
        let fields = split_middle(middle);

        if is_balance_operation(&fields.kind) {
            return RowKind::BalanceOperation;
        }

        let location = self
            .grammar
            .newlines
            .replace_all(&fields.location, " ")
            .trim()
            .to_string();

        RowKind::Transaction(Transaction::new(
            id,
            date,
            fields.kind,
            fields.operator,
            location,
            amount,
            balance,
        ))
    }

    fn classify_dateless<'a>(&self, line: &'a str) -> RowKind<'a> {
        if line.is_empty() {
            return RowKind::Noise(SkipReason::Empty);
        }
        if self.is_boilerplate(line) {
            return RowKind::Noise(SkipReason::Boilerplate);
        }
        RowKind::Continuation(line)
    }

    fn is_boilerplate(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        BOILERPLATE_MARKERS.iter().any(|m| lower.contains(m))
            || self.extra_boilerplate.iter().any(|m| lower.contains(m.as_str()))
            || self.grammar.bare_date.is_match(&lower)
    }
}

/// Type, operator and location recovered from the text between date and amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFields {
    pub kind: String,
    pub operator: String,
    pub location: String,
}

/// Split the middle of a row at the earliest known operator token, falling
/// back to the first space when no operator is recognised.
pub fn split_middle(middle: &str) -> RowFields {
    if let Some(op) = find_operator(middle) {
        let kind = middle[..op.start].trim();
        let rest = middle[op.start..].trim();
        let location = rest.strip_prefix(op.token).unwrap_or(rest).trim();
        return RowFields {
            kind: kind.to_string(),
            operator: op.canonical.to_string(),
            location: location.to_string(),
        };
    }

    let (kind, location) = match middle.find(' ') {
        Some(space) if space > 0 => (&middle[..space], middle[space..].trim()),
        _ => (middle, UNKNOWN_OPERATOR),
    };

    RowFields {
        kind: kind.to_string(),
        operator: UNKNOWN_OPERATOR.to_string(),
        location: location.to_string(),
    }
}

/// Sales ("venta") and top-ups ("recarga") move balance but are not trips.
pub fn is_balance_operation(kind: &str) -> bool {
    let normalized = kind.trim().to_lowercase();
    normalized.contains("venta") || normalized.contains("recarga")
}

/// "-1,35" -> -1.35
pub fn parse_decimal_comma(token: &str) -> Option<f64> {
    token.replace(',', ".").parse().ok()
}

fn parse_datetime(caps: &Captures<'_>) -> Option<chrono::NaiveDateTime> {
    let num = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();
    let year = caps.get(3)?.as_str().parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, num(2)?, num(1)?)?.and_hms_opt(num(4)?, num(5)?, num(6)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn parser() -> StatementParser {
        StatementParser::new().unwrap()
    }

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn expect_tx(kind: RowKind<'_>) -> Transaction {
        match kind {
            RowKind::Transaction(tx) => tx,
            other => panic!("expected transaction, got {other:?}"),
        }
    }

    #[test]
    fn test_parses_metro_row() {
        let tx = expect_tx(
            parser().classify("1043 12/03/2025 08:14:55 VALIDACIONENTRADA MB Metro Abando -1,35 23,10"),
        );
        assert_eq!(tx.id, 1043);
        assert_eq!(tx.date, ts("2025-03-12 08:14:55"));
        assert_eq!(tx.kind, "VALIDACIONENTRADA");
        assert_eq!(tx.operator, "Metro Bilbao");
        assert_eq!(tx.location, "Abando");
        assert_eq!(tx.amount, -1.35);
        assert_eq!(tx.balance, 23.10);
    }

    #[test]
    fn test_takes_two_rightmost_amounts() {
        // "12,50" inside the location must not be taken as the amount.
        let tx = expect_tx(parser().classify(
            "Tarjeta 77 01/02/2025 19:00:01 VALIDACIONUNICA Bilbobus Linea 12,50 -0,70 9,30",
        ));
        assert_eq!(tx.id, 77);
        assert_eq!(tx.amount, -0.70);
        assert_eq!(tx.balance, 9.30);
        assert_eq!(tx.location, "Linea 12,50");
    }

    #[test]
    fn test_euskotren_bus_canonicalizes_to_bizkaibus() {
        let tx = expect_tx(parser().classify(
            "5 03/04/2025 10:00:00 VALIDACIONUNICA Euskotren-Bus Leioa Kampusa -1,20 4,00",
        ));
        assert_eq!(tx.operator, "Bizkaibus");
        assert_eq!(tx.location, "Leioa Kampusa");
    }

    #[test]
    fn test_location_newlines_collapse_to_spaces() {
        let tx = expect_tx(parser().classify(
            "1 12/03/2025 08:14:55 VALIDACIONENTRADA MB Metro San\r\nInazio\nNorte -1,35 23,10",
        ));
        assert_eq!(tx.location, "San Inazio Norte");
        assert_eq!(tx.amount, -1.35);
    }

    #[test]
    fn test_unknown_operator_splits_on_first_space() {
        let tx = expect_tx(parser().classify("9 03/04/2025 10:00:00 VALIDACIONSALIDA Tranvia Atxuri 0,00 4,00"));
        assert_eq!(tx.kind, "VALIDACIONSALIDA");
        assert_eq!(tx.operator, UNKNOWN_OPERATOR);
        assert_eq!(tx.location, "Tranvia Atxuri");
    }

    #[test]
    fn test_single_word_middle_gets_unknown_location() {
        let fields = split_middle("PENALIZACION");
        assert_eq!(fields.kind, "PENALIZACION");
        assert_eq!(fields.operator, "Unknown");
        assert_eq!(fields.location, "Unknown");

        let empty = split_middle("");
        assert_eq!(empty.kind, "");
        assert_eq!(empty.location, "Unknown");
    }

    #[test]
    fn test_row_shape_misses_are_noise() {
        let p = parser();
        assert_eq!(
            p.classify("Nº 12/03/2025 08:14:55 VALIDACIONENTRADA MB Metro Abando -1,35 23,10"),
            RowKind::Noise(SkipReason::MissingId)
        );
        assert_eq!(
            p.classify("3 12/03/2025 08:14:55 VALIDACIONENTRADA MB Metro Abando -1,35"),
            RowKind::Noise(SkipReason::MissingAmounts)
        );
        assert_eq!(
            p.classify("3 31/02/2025 08:14:55 VALIDACIONENTRADA MB Metro Abando -1,35 2,00"),
            RowKind::Noise(SkipReason::InvalidDate)
        );
    }

    #[test]
    fn test_balance_operations_are_flagged() {
        let p = parser();
        assert_eq!(
            p.classify("4 12/03/2025 08:00:00 RECARGA MB GENERAL Taquilla 10,00 24,45"),
            RowKind::BalanceOperation
        );
        assert_eq!(
            p.classify("4 12/03/2025 08:00:00 Venta Titulo 3,00 24,45"),
            RowKind::BalanceOperation
        );
    }

    #[test]
    fn test_boilerplate_and_continuations() {
        let p = parser();
        assert_eq!(p.classify("  Salida Norte "), RowKind::Continuation("Salida Norte"));
        assert_eq!(p.classify("Tarjeta: 0001 2345"), RowKind::Noise(SkipReason::Boilerplate));
        assert_eq!(
            p.classify("Nº FECHA TRANSACCION TIPO"),
            RowKind::Noise(SkipReason::Boilerplate)
        );
        assert_eq!(p.classify("07/12/2025"), RowKind::Noise(SkipReason::Boilerplate));
        assert_eq!(p.classify("xxradaMonederoxx"), RowKind::Noise(SkipReason::Boilerplate));
        assert_eq!(p.classify("Dic 07, 2025 10:31"), RowKind::Noise(SkipReason::Boilerplate));
        assert_eq!(p.classify("   "), RowKind::Noise(SkipReason::Empty));
    }

    #[test]
    fn test_extra_boilerplate_markers() {
        assert_eq!(parser().classify("Página 2 de 3"), RowKind::Continuation("Página 2 de 3"));

        let p = StatementParser::with_boilerplate(["Página ", "  "]).unwrap();
        assert_eq!(p.classify("PÁGINA 2 de 3"), RowKind::Noise(SkipReason::Boilerplate));
        assert_eq!(p.classify("Abando"), RowKind::Continuation("Abando"));
    }

    #[test]
    fn test_fold_stitches_continuations() {
        let txns = parser().parse_page([
            "Tarjeta: 0001",
            "1 12/03/2025 08:14:55 VALIDACIONENTRADA MB Metro San -1,35 23,10",
            "Inazio",
            "2 12/03/2025 18:02:11 VALIDACIONSALIDA MB Metro Abando 0,00 23,10",
        ]);
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].location, "San Inazio");
        assert_eq!(txns[1].location, "Abando");
    }

    #[test]
    fn test_balance_operation_blocks_stitching() {
        let txns = parser().parse_page([
            "1 12/03/2025 08:14:55 VALIDACIONENTRADA MB Metro Abando -1,35 23,10",
            "5 12/03/2025 09:00:00 RECARGA Bilbobus Oficina 10,00 33,10",
            "Oficina Central",
        ]);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].location, "Abando");
    }

    #[test]
    fn test_discarded_dated_row_keeps_pending_open() {
        let p = parser();
        let (state, closed) = p.step(
            PageState::default(),
            "1 12/03/2025 08:14:55 VALIDACIONENTRADA MB Metro Abando -1,35 23,10",
        );
        assert!(closed.is_none());
        let (state, closed) = p.step(state, "12/03/2025 08:20:00 sin importe");
        assert!(closed.is_none());
        let (state, _) = p.step(state, "Sur");
        assert_eq!(state.pending().unwrap().location, "Abando Sur");
    }

    #[test]
    fn test_continuation_without_pending_is_dropped() {
        let txns = parser().parse_page(["Abando", "Sur"]);
        assert!(txns.is_empty());
    }

    #[test]
    fn test_decimal_comma_grammar() {
        assert_eq!(parse_decimal_comma("-1,35"), Some(-1.35));
        assert_eq!(parse_decimal_comma("23,10"), Some(23.10));
        assert_eq!(parse_decimal_comma("abc"), None);
    }
}
