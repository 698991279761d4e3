//! barik-ingest: rebuilds the transaction ledger of a Barik card statement
//! from positioned page text.

pub mod document;
pub mod error;
pub mod layout;
pub mod ledger;
pub mod operators;
pub mod parser;
pub mod types;

pub use document::{PageSource, PagedDocument};
pub use error::IngestError;
pub use layout::{DEFAULT_ROW_THRESHOLD, group_rows, page_lines};
pub use ledger::{IngestOptions, LedgerBuilder, build_ledger};
pub use operators::{KNOWN_OPERATORS, OperatorMatch, find_operator};
pub use parser::{PageState, RowKind, SkipReason, StatementParser};
pub use types::{Row, TextFragment};
