//! JSON statistics writer and reader.
//!
//! The file is a pretty-printed JSON array in ascending hop order:
//!
//! ```json
//! [
//!   { "hop": 1, "hosts": ["router.local", "(10.0.0.1)"],
//!     "min": 1.1, "max": 1.3, "avg": 1.2, "med": 1.2 }
//! ]
//! ```

use super::{ensure_parent_dir, validate_path};
use crate::parser::HopStatistics;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write per-hop statistics to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_statistics(
    stats: &[HopStatistics],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing statistics to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, stats)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(
        "Statistics written successfully ({} hops, {} bytes)",
        stats.len(),
        file_size(output_path)
    );

    Ok(())
}

/// Serialize statistics to a pretty JSON string
///
/// **Public** - useful for tests and stdout output
pub fn statistics_to_string(stats: &[HopStatistics]) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(stats)?)
}

/// Read statistics back from a JSON file
///
/// **Public** - used by the validate command
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_statistics(input_path: impl AsRef<Path>) -> Result<Vec<HopStatistics>, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading statistics from: {}", input_path.display());

    let file = File::open(input_path)?;
    let stats: Vec<HopStatistics> = serde_json::from_reader(BufReader::new(file))?;

    debug!("Loaded statistics for {} hops", stats.len());
    Ok(stats)
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn create_test_statistics() -> Vec<HopStatistics> {
        vec![
            HopStatistics {
                hop: 1,
                hosts: vec!["router.local".to_string(), "(10.0.0.1)".to_string()],
                min: 1.1,
                max: 1.3,
                avg: 1.2,
                med: 1.2,
            },
            HopStatistics {
                hop: 2,
                hosts: vec![],
                min: 0.0,
                max: 14.2,
                avg: 4.733,
                med: 0.0,
            },
        ]
    }

    #[test]
    fn test_write_and_read_statistics() {
        let stats = create_test_statistics();
        let temp_file = NamedTempFile::new().unwrap();

        write_statistics(&stats, temp_file.path()).unwrap();
        let loaded = read_statistics(temp_file.path()).unwrap();

        assert_eq!(loaded, stats);
    }

    #[test]
    fn test_statistics_field_names() {
        let json = statistics_to_string(&create_test_statistics()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let first = &value[0];
        assert_eq!(first["hop"], 1);
        assert_eq!(first["hosts"][1], "(10.0.0.1)");
        for key in ["min", "max", "avg", "med"] {
            assert!(first[key].is_number(), "missing numeric field {}", key);
        }
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/stats.json");

        write_statistics(&create_test_statistics(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_read_rejects_wrong_shape() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), r#"{"hop": 1}"#).unwrap();

        let result = read_statistics(temp_file.path());
        assert!(matches!(result, Err(OutputError::SerializationFailed(_))));
    }
}
