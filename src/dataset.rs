use std::{fs::File, io::Read, path::Path};

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use log::debug;

/// Every numeric field of a CSV input, flattened in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    values: Vec<f64>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Dataset> {
        let context = || format!("Failed to read file {}", path.display());
        let file = File::open(path).with_context(context)?;
        debug!("loading data from {}", path.display());
        Dataset::from_reader(file).with_context(context)
    }

    /// Records may have any number of fields. A blank line is an empty
    /// record and fails like any other unparseable field.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Dataset> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let blank_line = first_blank_line(&input);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input.as_bytes());

        let mut values = Vec::new();
        let mut records = 0;
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(records + 1, |position| position.line());
            // the csv reader drops blank lines, so the record after one starts on it
            if let Some((blank, text)) = blank_line.filter(|&(blank, _)| line >= blank) {
                bail!("invalid number `{}` at line {}, field 1: empty record", text, blank);
            }
            for (index, field) in record.iter().enumerate() {
                values.push(parse_field(field).with_context(|| {
                    format!("invalid number `{}` at line {}, field {}", field, line, index + 1)
                })?);
            }
            records += 1;
        }
        if let Some((blank, text)) = blank_line {
            bail!("invalid number `{}` at line {}, field 1: empty record", text, blank);
        }
        debug!("parsed {} values from {} records", values.len(), records);

        Ok(Dataset { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

fn parse_field(field: &str) -> Result<f64, std::num::ParseFloatError> {
    field.trim().parse()
}

/// First line outside a quoted field that holds only whitespace, with its text.
/// The terminator of the last line does not open another one.
fn first_blank_line(input: &str) -> Option<(u64, &str)> {
    if input.is_empty() {
        return None;
    }
    let mut quoted = false;
    let body = input.strip_suffix('\n').unwrap_or(input);
    for (index, line) in body.split('\n').enumerate() {
        let line = line.trim_end_matches('\r');
        if !quoted && line.trim().is_empty() {
            return Some((index as u64 + 1, line));
        }
        quoted ^= line.matches('"').count() % 2 == 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn read(input: &str) -> Result<Dataset> {
        Dataset::from_reader(input.as_bytes())
    }

    #[test]
    fn test_flattens_records_in_order() {
        let dataset = read("1,2,3\n4,5,6").unwrap();
        assert_eq!(dataset.values(), &[1., 2., 3., 4., 5., 6.]);
    }

    #[test]
    fn test_ragged_records() {
        let dataset = read("1\n2,3\n4,5,6,7\n").unwrap();
        assert_eq!(dataset.values(), &[1., 2., 3., 4., 5., 6., 7.]);
    }

    #[test]
    fn test_quoted_and_padded_fields() {
        let dataset = read("\"1.5\", 2 ,-3e2\r\n\"4\"\n").unwrap();
        assert_eq!(dataset.values(), &[1.5, 2., -300., 4.]);
    }

    #[test]
    fn test_blank_line_is_an_empty_record() {
        for (input, text) in [("1,2\n\n3\n", ""), ("1,2\n \n3\n", " "), ("1,2\r\n\r\n3", "")].iter() {
            let err = read(input).unwrap_err();
            assert_eq!(
                format!("{:#}", err),
                format!("invalid number `{}` at line 2, field 1: empty record", text)
            );
        }
    }

    #[test]
    fn test_trailing_blank_line() {
        let err = read("1,2\n\n").unwrap_err();
        assert!(err.to_string().contains("at line 2, field 1"));
        assert!(read("\n").is_err());
    }

    #[test]
    fn test_errors_reported_in_file_order() {
        let err = read("x\n\n1\n").unwrap_err();
        assert!(err.to_string().starts_with("invalid number `x` at line 1, field 1"));
    }

    #[test]
    fn test_blank_line_inside_quoted_field() {
        let dataset = read("1,\"2\n\n\"\n3\n").unwrap();
        assert_eq!(dataset.values(), &[1., 2., 3.]);
    }

    #[test]
    fn test_empty_input() {
        assert!(read("").unwrap().values().is_empty());
    }

    #[test]
    fn test_non_numeric_field() {
        let err = read("1,2,3\n1,2,x\n").unwrap_err();
        assert_eq!(
            format!("{:#}", err),
            "invalid number `x` at line 2, field 3: invalid float literal"
        );
    }

    #[test]
    fn test_empty_field() {
        let err = read("1,,2").unwrap_err();
        assert!(err.to_string().contains("field 2"));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "10,20\n30\n").unwrap();
        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.values(), &[10., 20., 30.]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let err = Dataset::load(&path).unwrap_err();
        assert!(err
            .to_string()
            .starts_with(&format!("Failed to read file {}", path.display())));
    }
}
