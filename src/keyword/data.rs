//! Tabular data for data-driven runs
//!
//! A data file is a CSV whose header names become record keys; the
//! scenario runs once per row with `{column}` placeholders in locators
//! and values replaced by that row's cells.

use std::collections::HashMap;
use std::path::Path;

use crate::common::{Error, Result};

use super::step::{Step, StepSequence};

/// One row of a data file, keyed by column name
pub type Record = HashMap<String, String>;

/// Load data records from a CSV file
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).map_err(|e| Error::file_read(path, &e))?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::DataFormat(format!("unreadable header row: {e}")))?
        .clone();

    let mut records = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let row = row.map_err(|e| Error::DataFormat(format!("data row {}: {e}", idx + 1)))?;
        let mut record = Record::new();
        for (i, header) in headers.iter().enumerate() {
            record.insert(
                header.to_string(),
                row.get(i).unwrap_or_default().to_string(),
            );
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(Error::DataFormat(format!(
            "data file '{}' has no rows",
            path.display()
        )));
    }
    tracing::debug!(path = %path.display(), rows = records.len(), "loaded data file");
    Ok(records)
}

/// Substitute `{column}` placeholders from `record` into every step.
///
/// Substitution applies to the `locator` and `value` fields only, and
/// only for tokens naming a column of the record; all other brace text
/// (CSS attribute selectors, XPath predicates) passes through untouched.
pub fn apply_record(steps: &StepSequence, record: &Record) -> StepSequence {
    let substitute = |text: &str| {
        let mut out = text.to_string();
        for (key, value) in record {
            let token = format!("{{{key}}}");
            if out.contains(&token) {
                out = out.replace(&token, value);
            }
        }
        out
    };

    StepSequence::new(
        steps
            .iter()
            .map(|step| Step {
                action: step.action,
                locator_type: step.locator_type.clone(),
                locator: substitute(&step.locator),
                value: substitute(&step.value),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::loader::load_steps_from_reader;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn placeholders_are_substituted_into_locator_and_value() {
        let steps = load_steps_from_reader(
            "action,locator_type,locator,value\n\
             enter_text,id,CustomerEmail,{email}\n\
             assert_text,css,.order-{order_id} .status,{email}\n"
                .as_bytes(),
        )
        .unwrap();

        let applied = apply_record(
            &steps,
            &record(&[("email", "jane@example.com"), ("order_id", "1042")]),
        );
        assert_eq!(applied.steps()[0].value, "jane@example.com");
        assert_eq!(applied.steps()[1].locator, ".order-1042 .status");
        assert_eq!(applied.steps()[1].value, "jane@example.com");
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let steps = load_steps_from_reader(
            "action,locator_type,locator,value\n\
             click,css,\"a[data-state='{open}']\",\n"
                .as_bytes(),
        )
        .unwrap();
        let applied = apply_record(&steps, &record(&[("email", "jane@example.com")]));
        assert_eq!(applied.steps()[0].locator, "a[data-state='{open}']");
    }

    #[test]
    fn original_sequence_is_untouched() {
        let steps = load_steps_from_reader(
            "action,locator_type,locator,value\nenter_text,id,email,{email}\n".as_bytes(),
        )
        .unwrap();
        let _ = apply_record(&steps, &record(&[("email", "jane@example.com")]));
        assert_eq!(steps.steps()[0].value, "{email}");
    }
}
