//! Scene catalog: parsing of the scene detector's CSV output.
//!
//! The detector writes comma-separated text with a header row and at least
//! seven columns per data row:
//!
//! ```text
//! 0: Scene Number    3: Start Time (seconds)    6: End Time (seconds)
//! 1: Start Timecode  4: End Timecode
//! 2: Start Frame     5: End Frame
//! ```
//!
//! Only columns 3 and 6 are consumed. File order is assumed chronological
//! and is preserved.

use std::fs;
use std::path::Path;

use crate::error::CoreResult;
use crate::interval::TimeInterval;

/// Parses a scene CSV file into scene intervals, in file order.
pub fn parse_scenes_csv(path: &Path) -> CoreResult<Vec<TimeInterval>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_scenes(&text))
}

/// Parses scene CSV text. The header row is skipped; a row with fewer than
/// seven columns, or whose time fields do not parse as numbers, is silently
/// skipped rather than treated as an error.
#[must_use]
pub fn parse_scenes(text: &str) -> Vec<TimeInterval> {
    let mut scenes = Vec::new();

    for line in text.lines().skip(1) {
        let parts: Vec<&str> = line.trim().split(',').collect();
        if parts.len() < 7 {
            continue;
        }
        let start = match parts[3].trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => continue,
        };
        let end = match parts[6].trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => continue,
        };
        scenes.push(TimeInterval::new(start, end));
    }

    scenes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "Scene Number,Start Timecode,Start Frame,Start Time (seconds),End Timecode,End Frame,End Time (seconds)";

    #[test]
    fn parses_valid_rows_in_file_order() {
        let text = format!(
            "{HEADER}\n\
             1,00:00:00.000,0,0.000,00:00:05.000,125,5.000\n\
             2,00:00:05.000,125,5.000,00:00:12.500,312,12.500\n"
        );
        let scenes = parse_scenes(&text);
        assert_eq!(
            scenes,
            vec![TimeInterval::new(0.0, 5.0), TimeInterval::new(5.0, 12.5)]
        );
    }

    #[test]
    fn short_row_is_skipped() {
        let text = format!(
            "{HEADER}\n\
             1,00:00:00.000,0,0.000,00:00:05.000,125\n\
             2,00:00:05.000,125,5.000,00:00:12.500,312,12.500\n"
        );
        let scenes = parse_scenes(&text);
        assert_eq!(scenes, vec![TimeInterval::new(5.0, 12.5)]);
    }

    #[test]
    fn non_numeric_time_field_is_skipped() {
        let text = format!(
            "{HEADER}\n\
             1,00:00:00.000,0,oops,00:00:05.000,125,5.000\n\
             2,00:00:05.000,125,5.000,00:00:12.500,312,not-a-number\n\
             3,00:00:12.500,312,12.500,00:00:20.000,500,20.000\n"
        );
        let scenes = parse_scenes(&text);
        assert_eq!(scenes, vec![TimeInterval::new(12.5, 20.0)]);
    }

    #[test]
    fn header_only_file_yields_no_scenes() {
        assert!(parse_scenes(&format!("{HEADER}\n")).is_empty());
    }

    #[test]
    fn reads_from_a_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "1,00:00:00.000,0,1.250,00:00:05.000,125,6.750").unwrap();
        file.flush().unwrap();

        let scenes = parse_scenes_csv(file.path()).unwrap();
        assert_eq!(scenes, vec![TimeInterval::new(1.25, 6.75)]);
    }
}
