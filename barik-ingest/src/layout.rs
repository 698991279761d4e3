//! Row reconstruction: turns the unordered fragments of one page into
//! top-to-bottom rows.
//!
//! Grouping is a greedy single pass over fragments sorted by `y`: each
//! fragment is compared with the previous fragment (not the first one of the
//! row). Superscripts or overlapping baselines can end up in the wrong row.

use crate::types::{Row, TextFragment};

/// Maximum baseline distance, in layout units, for two fragments to share a row.
pub const DEFAULT_ROW_THRESHOLD: f64 = 8.0;

pub fn group_rows(mut fragments: Vec<TextFragment>, threshold: f64) -> Vec<Row> {
    // Stable: fragments on the same baseline keep provider order until the x sort.
    fragments.sort_by(|a, b| b.y.total_cmp(&a.y));

    let mut rows: Vec<Row> = Vec::new();
    let mut current: Vec<TextFragment> = Vec::new();
    let mut prev_y: Option<f64> = None;

    for fragment in fragments {
        let same_row = prev_y.is_some_and(|y| (fragment.y - y).abs() < threshold);
        prev_y = Some(fragment.y);

        if !same_row && !current.is_empty() {
            rows.push(Row {
                fragments: std::mem::take(&mut current),
            });
        }
        current.push(fragment);
    }
    if !current.is_empty() {
        rows.push(Row { fragments: current });
    }

    for row in &mut rows {
        row.fragments.sort_by(|a, b| a.x.total_cmp(&b.x));
    }

    rows
}

/// Rows of one page rendered as text lines.
pub fn page_lines(fragments: Vec<TextFragment>, threshold: f64) -> Vec<String> {
    group_rows(fragments, threshold)
        .iter()
        .map(Row::line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, x: f64, y: f64) -> TextFragment {
        TextFragment::new(text, x, y)
    }

    #[test]
    fn test_groups_by_baseline_and_orders_by_x() {
        let fragments = vec![
            frag("b2", 200.0, 700.0),
            frag("a1", 10.0, 720.0),
            frag("b1", 10.0, 703.0),
            frag("a2", 100.0, 721.5),
            frag("c1", 10.0, 650.0),
        ];

        let lines = page_lines(fragments, DEFAULT_ROW_THRESHOLD);
        assert_eq!(lines, vec!["a1 a2", "b1 b2", "c1"]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let fragments = vec![frag("top", 0.0, 108.0), frag("bottom", 0.0, 100.0)];
        let rows = group_rows(fragments, 8.0);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_compares_against_previous_fragment_not_row_start() {
        // 100 -> 94 -> 88: each step is under the threshold, so all three chain
        // into one row even though the ends are 12 units apart.
        let fragments = vec![
            frag("c", 30.0, 88.0),
            frag("a", 10.0, 100.0),
            frag("b", 20.0, 94.0),
        ];
        let rows = group_rows(fragments, 8.0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line(), "a b c");
    }

    #[test]
    fn test_empty_page_has_no_rows() {
        assert!(group_rows(Vec::new(), DEFAULT_ROW_THRESHOLD).is_empty());
    }

    #[test]
    fn test_line_trims_blank_fragments() {
        let fragments = vec![frag(" ", 0.0, 10.0), frag("Abando", 5.0, 10.0), frag("", 9.0, 10.0)];
        assert_eq!(page_lines(fragments, 8.0), vec!["Abando"]);
    }
}
