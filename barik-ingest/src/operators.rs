//! Known transit operator tokens and their canonical display names.
//!
//! Matching is a plain substring scan in table order. The earliest position
//! in the text wins; on a tie the entry listed first wins, so "Euskotren-Bus"
//! shadows "Euskotren-Bus-".

/// (token as printed on the statement, canonical operator name)
pub const KNOWN_OPERATORS: &[(&str, &str)] = &[
    ("MB Metro", "Metro Bilbao"),
    ("Renfe FFCC", "Renfe"),
    ("EuskoTren-EuskoTran", "Euskotren Tranbia"),
    ("Euskotren Ferrocarril", "Euskotren"),
    ("Euskotren-Bus", "Bizkaibus"),
    ("Bilbobus", "Bilbobus"),
    ("Funicular Artxanda", "Funicular Artxanda"),
    ("Bizkaiko Zubia", "Bizkaiko Zubia"),
    ("Donosti Bus", "Donosti Bus"),
    ("Boteros Portugalete", "Boteros Portugalete"),
    ("MB GENERAL", "Metro Bilbao"),
    ("Bizkaibus", "Bizkaibus"),
    ("Nerbioi-Arratia", "Bizkaibus"),
    ("Euskotren-Bus-", "Bizkaibus"),
    ("EuskoTren-Funicular", "Funicular Larreineta"),
];

/// A known operator token located inside a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorMatch {
    pub token: &'static str,
    pub canonical: &'static str,
    /// Byte offset of the token in the searched text
    pub start: usize,
}

/// Earliest known operator token in `text`.
pub fn find_operator(text: &str) -> Option<OperatorMatch> {
    let mut best: Option<OperatorMatch> = None;

    for &(token, canonical) in KNOWN_OPERATORS {
        let Some(start) = text.find(token) else {
            continue;
        };
        if best.is_none_or(|b| start < b.start) {
            best = Some(OperatorMatch {
                token,
                canonical,
                start,
            });
        }
    }

    best
}
