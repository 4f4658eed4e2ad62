//! Record documents in and out: a file path, or `-` for stdin/stdout.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use sheetsync_core::records::{read_records, write_records};
use sheetsync_core::Record;

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

pub fn read_input(path: &Path) -> Result<Vec<Record>> {
    if is_stdio(path) {
        return read_records(std::io::stdin().lock()).context("invalid JSON records on stdin");
    }
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    read_records(BufReader::new(file))
        .with_context(|| format!("invalid JSON records in {}", path.display()))
}

pub fn write_output(path: &Path, records: &[Record]) -> Result<()> {
    if is_stdio(path) {
        let mut out = std::io::stdout().lock();
        write_records(&mut out, records).context("failed to write records to stdout")?;
        writeln!(out)?;
        return Ok(());
    }

    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_records(&mut out, records)
        .with_context(|| format!("failed to write records to {}", path.display()))?;
    writeln!(out)?;
    out.flush()
        .with_context(|| format!("failed to write records to {}", path.display()))?;
    tracing::info!(path = %path.display(), records = records.len(), "records written");
    Ok(())
}
