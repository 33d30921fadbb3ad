//! CSV export of classification results. Uses the `csv` crate for safe
//! serialization.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::domain::ClassificationResult;

/// Serialize a result as CSV: an `L1,L2,L3` header row plus one data row.
pub fn result_to_csv(result: &ClassificationResult) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.serialize(result)?;
    wtr.flush()?;

    let bytes = wtr.into_inner().map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::Other,
            e.to_string(),
        ))
    })?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

/// Write the result into `dir` under a timestamped filename. Creates the
/// directory if needed; returns the path of the written file.
pub fn write_result_csv(dir: &Path, result: &ClassificationResult) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let filename = format!(
        "classification_{}.csv",
        Utc::now().format("%Y%m%d_%H%M%S")
    );
    let path = dir.join(filename);
    std::fs::write(&path, result_to_csv(result)?)?;
    Ok(path)
}
