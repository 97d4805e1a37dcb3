//! Per-category sample dumps.
//!
//! One CSV file per cost category, header first, columns in a fixed order.
//! Files are overwritten on every run.

use super::validate_path;
use crate::aggregator::Accumulator;
use crate::report::CostCategory;
use crate::utils::error::OutputError;
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write the raw samples of `category` into `dir`
///
/// **Public** - returns the path of the written file
///
/// # Errors
/// * `OutputError::InvalidPath` - target is a directory or cannot be created
/// * `OutputError::CsvFailed` - write failure
pub fn write_samples_csv(
    category: CostCategory,
    acc: &Accumulator,
    dir: impl AsRef<Path>,
) -> Result<PathBuf, OutputError> {
    let path = dir.as_ref().join(category.csv_file());
    validate_path(&path)?;
    super::create_parent_dirs(&path)?;

    let file = std::fs::File::create(&path).map_err(OutputError::WriteFailed)?;
    let rows = write_samples(category, acc, file)?;

    info!("{} rows written to: {}", rows, path.display());
    Ok(path)
}

/// Write the samples of `category` as CSV into any writer
pub fn write_samples<W: Write>(
    category: CostCategory,
    acc: &Accumulator,
    writer: W,
) -> Result<usize, OutputError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(category.csv_columns())?;

    let rows = match category {
        CostCategory::Fetch => {
            for s in &acc.fetch {
                wtr.serialize((&s.benchmark_name, s.size, s.nb_tx, s.ticks))?;
            }
            acc.fetch.len()
        }
        CostCategory::TxRegister => {
            for s in &acc.tx_register {
                wtr.serialize((&s.benchmark_name, s.tx_size, s.ticks))?;
            }
            acc.tx_register.len()
        }
        CostCategory::BlockFinalization => {
            for b in &acc.blocks {
                wtr.serialize((&b.benchmark_name, b.nb_tx, b.size, b.finalize_ticks))?;
            }
            acc.blocks.len()
        }
        CostCategory::TxOverhead => {
            for s in &acc.transfers {
                wtr.serialize((&s.benchmark_name, s.tx_size, s.ticks))?;
            }
            acc.transfers.len()
        }
    };

    wtr.flush().map_err(OutputError::WriteFailed)?;
    Ok(rows)
}

/// Write the samples of every category into `dir`
pub fn write_all_samples(
    acc: &Accumulator,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, OutputError> {
    CostCategory::ALL
        .iter()
        .map(|&category| write_samples_csv(category, acc, dir.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::FetchSample;

    #[test]
    fn test_fetch_columns_and_order() {
        let mut acc = Accumulator::new();
        for (name, size) in [("b", 300.0), ("a", 100.0)] {
            acc.fetch.push(FetchSample {
                benchmark_name: name.to_string(),
                size,
                nb_tx: 2.0,
                ticks: 400_000.0,
            });
        }

        let mut buffer = Vec::new();
        let rows = write_samples(CostCategory::Fetch, &acc, &mut buffer).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "benchmark_name,size,nb_tx,ticks\nb,300.0,2.0,400000.0\na,100.0,2.0,400000.0\n"
        );
    }

    #[test]
    fn test_unfinalized_block_has_empty_ticks() {
        let mut acc = Accumulator::new();
        acc.open_block(None, "x", 3.0, None).unwrap();

        let mut buffer = Vec::new();
        write_samples(CostCategory::BlockFinalization, &acc, &mut buffer).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "benchmark_name,nb_tx,size,ticks\nx,3.0,,\n"
        );
    }
}
