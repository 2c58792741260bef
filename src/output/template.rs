//! Write flows into a SankeyMATIC template file.
//!
//! The template carries a `// === Nodes and Flows ===` marker; generated
//! flows are inserted on the line after it. Any `%GENERATED DATETIME%`
//! placeholder is replaced with the generation time.

use crate::utils::config::{
    FILE_TIMESTAMP_FORMAT, FLOWS_MARKER, OUTPUT_FILE_PREFIX, TIMESTAMP_FORMAT, TIMESTAMP_PLACEHOLDER,
};
use crate::utils::error::OutputError;
use chrono::NaiveDateTime;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Fill a template with a timestamp and flow text
///
/// **Public** - pure string transformation, used by `write_formatted`
///
/// # Errors
/// * `OutputError::MissingMarker` - template has no flows marker
pub fn render_template(template: &str, flows_text: &str, timestamp: &str) -> Result<String, OutputError> {
    if !template.contains(FLOWS_MARKER) {
        return Err(OutputError::MissingMarker(FLOWS_MARKER.to_string()));
    }

    let stamped = template.replace(TIMESTAMP_PLACEHOLDER, timestamp);
    let replacement = format!("{}\n{}", FLOWS_MARKER, flows_text);
    Ok(stamped.replace(FLOWS_MARKER, &replacement))
}

/// File name for a formatted output generated at `now`
pub fn output_file_name(now: &NaiveDateTime) -> String {
    format!("{}{}.txt", OUTPUT_FILE_PREFIX, now.format(FILE_TIMESTAMP_FORMAT))
}

/// Read `template_path`, fill it, and write the result into `output_dir`
///
/// **Public** - used by the generate command for `--formatted`
///
/// # Returns
/// Path of the written file
///
/// # Errors
/// * `OutputError::WriteFailed` - template unreadable or output unwritable
/// * `OutputError::MissingMarker` - template has no flows marker
/// * `OutputError::InvalidPath` - output directory cannot be created
pub fn write_formatted(
    template_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    flows_text: &str,
    now: &NaiveDateTime,
) -> Result<PathBuf, OutputError> {
    let template_path = template_path.as_ref();
    let output_dir = output_dir.as_ref();

    debug!("Reading template: {}", template_path.display());
    let template = fs::read_to_string(template_path)?;

    let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
    let content = render_template(&template, flows_text, &timestamp)?;

    if !output_dir.as_os_str().is_empty() && !output_dir.exists() {
        debug!("Creating output directory: {}", output_dir.display());
        fs::create_dir_all(output_dir).map_err(|e| {
            OutputError::InvalidPath(format!("Cannot create directory {}: {}", output_dir.display(), e))
        })?;
    }

    let output_path = output_dir.join(output_file_name(now));
    fs::write(&output_path, content)?;

    info!("Successfully created formatted file: {}", output_path.display());
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap()
    }

    #[test]
    fn test_render_template() {
        let template = "// Generated %GENERATED DATETIME%\n// === Nodes and Flows ===\n\n// === Settings ===\n";
        let rendered = render_template(template, "A [1] B", "2024-03-05 14:07:09").unwrap();

        assert_eq!(
            rendered,
            "// Generated 2024-03-05 14:07:09\n// === Nodes and Flows ===\nA [1] B\n\n// === Settings ===\n"
        );
    }

    #[test]
    fn test_render_template_missing_marker() {
        let result = render_template("no marker here", "A [1] B", "now");
        assert!(matches!(result, Err(OutputError::MissingMarker(_))));
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(&fixed_time()), "sankeymatic_20240305-140709.txt");
    }

    #[test]
    fn test_write_formatted_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("template.txt");
        fs::write(&template_path, "%GENERATED DATETIME%\n// === Nodes and Flows ===\n").unwrap();

        let out_dir = dir.path().join("nested/out");
        let written = write_formatted(&template_path, &out_dir, "X [2] Y", &fixed_time()).unwrap();

        assert_eq!(written, out_dir.join("sankeymatic_20240305-140709.txt"));
        assert_eq!(
            fs::read_to_string(&written).unwrap(),
            "2024-03-05 14:07:09\n// === Nodes and Flows ===\nX [2] Y\n"
        );
    }

    #[test]
    fn test_write_formatted_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let result = write_formatted(dir.path().join("nope.txt"), dir.path(), "", &fixed_time());
        assert!(matches!(result, Err(OutputError::WriteFailed(_))));
    }
}
