//! JSON output of surviving repository records.

use crate::search::RepositoryRecord;
use serde::Deserialize;
use std::io::{self, Write};

/// How records are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One pretty-printed JSON array.
    #[default]
    Pretty,
    /// One compact JSON object per line.
    Lines,
}

/// Writes `records` to `out` in the given format.
///
/// Records are written exactly as received. An empty list is written as `[]`
/// in [`OutputFormat::Pretty`] and as nothing in [`OutputFormat::Lines`].
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn write_report<W: Write>(
    out: &mut W,
    records: &[RepositoryRecord],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
        OutputFormat::Lines => {
            for record in records {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample() -> Vec<RepositoryRecord> {
        vec![
            serde_json::from_str(r#"{"full_name":"numpy/numpy","stargazers_count":3}"#).unwrap(),
            RepositoryRecord::new("scipy/scipy"),
        ]
    }

    fn render(records: &[RepositoryRecord], format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_report(&mut out, records, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn pretty_writes_array() {
        let text = render(&sample(), OutputFormat::Pretty);
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value[0]["full_name"], "numpy/numpy");
        assert_eq!(value[0]["stargazers_count"], 3);
        assert_eq!(value[1]["full_name"], "scipy/scipy");
        assert!(text.ends_with("]\n"));
    }

    #[test]
    fn lines_writes_one_record_per_line() {
        let text = render(&sample(), OutputFormat::Lines);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        let second: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["full_name"], "scipy/scipy");
    }

    #[test]
    fn empty_list() {
        assert_eq!(render(&[], OutputFormat::Pretty), "[]\n");
        assert_eq!(render(&[], OutputFormat::Lines), "");
    }

    #[test]
    fn format_parses_lowercase() {
        #[derive(Deserialize)]
        struct Holder {
            format: OutputFormat,
        }
        let holder: Holder = toml::from_str("format = \"lines\"").unwrap();
        assert_eq!(holder.format, OutputFormat::Lines);
    }
}
