//! Ledger builder: runs row reconstruction and the row parser page by page
//! and concatenates the results in document order.

use barik_core::Transaction;
use serde::{Deserialize, Serialize};

use crate::document::PageSource;
use crate::error::IngestError;
use crate::layout::{DEFAULT_ROW_THRESHOLD, page_lines};
use crate::parser::StatementParser;
use crate::types::TextFragment;

/// Tunables for extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Baseline distance under which fragments share a row
    pub row_threshold: f64,
    /// Extra case-insensitive markers of lines that are never continuations
    pub ignore_lines: Vec<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            row_threshold: DEFAULT_ROW_THRESHOLD,
            ignore_lines: Vec::new(),
        }
    }
}

pub struct LedgerBuilder {
    parser: StatementParser,
    row_threshold: f64,
}

impl LedgerBuilder {
    pub fn new(options: &IngestOptions) -> Result<Self, IngestError> {
        let t = options.row_threshold;
        if !(t.is_finite() && t > 0.0) {
            return Err(IngestError::InvalidThreshold(t));
        }
        Ok(Self {
            parser: StatementParser::with_boilerplate(&options.ignore_lines)?,
            row_threshold: options.row_threshold,
        })
    }

    /// Transactions of a single page. Parser state starts fresh.
    pub fn parse_page(&self, fragments: Vec<TextFragment>) -> Vec<Transaction> {
        self.parser
            .parse_page(page_lines(fragments, self.row_threshold))
    }

    /// Pull every page from `source`, in order.
    pub async fn build<S: PageSource>(&self, source: &S) -> Result<Vec<Transaction>, IngestError> {
        let mut ledger = Vec::new();

        for page in 1..=source.page_count() {
            let fragments = source.page_fragments(page).await?;
            let fragment_count = fragments.len();
            let txns = self.parse_page(fragments);
            tracing::debug!(page, fragment_count, transactions = txns.len(), "parsed page");
            ledger.extend(txns);
        }

        finish(ledger)
    }

    /// Same as [`LedgerBuilder::build`] for pages already in memory.
    pub fn build_from_pages<I>(&self, pages: I) -> Result<Vec<Transaction>, IngestError>
    where
        I: IntoIterator<Item = Vec<TextFragment>>,
    {
        let mut ledger = Vec::new();
        for (i, fragments) in pages.into_iter().enumerate() {
            let txns = self.parse_page(fragments);
            tracing::debug!(page = i + 1, transactions = txns.len(), "parsed page");
            ledger.extend(txns);
        }
        finish(ledger)
    }
}

fn finish(ledger: Vec<Transaction>) -> Result<Vec<Transaction>, IngestError> {
    if ledger.is_empty() {
        return Err(IngestError::EmptyLedger);
    }
    tracing::info!(transactions = ledger.len(), "ledger built");
    Ok(ledger)
}

/// Build a ledger with default options.
pub async fn build_ledger<S: PageSource>(source: &S) -> Result<Vec<Transaction>, IngestError> {
    LedgerBuilder::new(&IngestOptions::default())?
        .build(source)
        .await
}
