use anyhow::{Context, Result};
use barik_core::Transaction;
use std::io::Write;
use std::path::Path;

/// Write the ledger as CSV with a header row.
pub fn write_ledger_csv<W: Write>(writer: W, ledger: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for tx in ledger {
        wtr.serialize(tx).context("serialize transaction")?;
    }
    wtr.flush().context("flush csv")?;
    Ok(())
}

pub fn export_ledger_csv(path: &Path, ledger: &[Transaction]) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_ledger_csv(file, ledger).with_context(|| format!("write {}", path.display()))
}
