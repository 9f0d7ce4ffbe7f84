//! Step file loading
//!
//! Step files are CSV with the columns `action`, `locator_type`,
//! `locator`, `value`, one row per step. Column lookup is strictly by
//! header name, so column order is irrelevant. Missing optional columns
//! default to empty strings and unknown extra columns are ignored.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::common::{Error, Result};

use super::runner::{scroll_offsets, sleep_duration, zoom_percent};
use super::step::{Action, Step, StepSequence};

/// Raw CSV row before action parsing and contract checks
#[derive(Debug, Deserialize)]
struct RawStep {
    #[serde(default)]
    action: String,
    #[serde(default)]
    locator_type: String,
    #[serde(default)]
    locator: String,
    #[serde(default)]
    value: String,
}

/// Load a step sequence from a CSV file
pub fn load_steps(path: &Path) -> Result<StepSequence> {
    let file = std::fs::File::open(path).map_err(|e| Error::file_read(path, &e))?;
    let steps = load_steps_from_reader(file)?;
    tracing::debug!(path = %path.display(), steps = steps.len(), "loaded step file");
    Ok(steps)
}

/// Load a step sequence from any CSV source
pub fn load_steps_from_reader<R: Read>(reader: R) -> Result<StepSequence> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let has_action_column = {
        let headers = csv_reader
            .headers()
            .map_err(|e| Error::DataFormat(format!("unreadable header row: {e}")))?;
        headers.iter().any(|h| h == "action")
    };
    if !has_action_column {
        return Err(Error::DataFormat(
            "missing required column 'action'".to_string(),
        ));
    }

    let mut steps = Vec::new();
    for (idx, row) in csv_reader.deserialize::<RawStep>().enumerate() {
        let step_num = idx + 1;
        let row = row.map_err(|e| Error::DataFormat(format!("step {step_num}: {e}")))?;

        let action: Action = row.action.parse().map_err(|_| {
            Error::UnsupportedAction(format!("'{}' at step {step_num}", row.action))
        })?;

        // Element actions must carry a locator; catching this at load
        // time keeps a malformed file from failing halfway through a run.
        if action.requires_locator()
            && (row.locator_type.is_empty() || row.locator.is_empty())
        {
            return Err(Error::Locator(format!(
                "Missing locator for action {action} at step {step_num}"
            )));
        }

        steps.push(Step {
            action,
            locator_type: row.locator_type,
            locator: row.locator,
            value: row.value,
        });
    }

    Ok(StepSequence::new(steps))
}

/// Validate everything that can be checked without a browser.
///
/// Beyond the load-time contract this also resolves locator kinds and
/// parses numeric values, both of which `run` defers to execution time.
pub fn validate_strict(steps: &StepSequence) -> Result<()> {
    for (idx, step) in steps.iter().enumerate() {
        let step_num = idx + 1;
        let check: Result<()> = match step.action {
            Action::OpenUrl => {
                if step.value.is_empty() {
                    Err(Error::DataFormat("open_url requires a URL value".into()))
                } else {
                    Ok(())
                }
            }
            Action::Sleep => sleep_duration(&step.value).map(|_| ()),
            Action::ScrollBy => scroll_offsets(&step.value, None).map(|_| ()),
            Action::ScrollTo => scroll_offsets(&step.value, Some((0.0, 0.0))).map(|_| ()),
            Action::Zoom => zoom_percent(&step.value).map(|_| ()),
            _ if step.action.requires_locator() => step.resolve_locator().map(|_| ()),
            _ => Ok(()),
        };
        check.map_err(|e| Error::step_failed(step_num, step.action.keyword(), e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::step::Action;

    fn load(csv: &str) -> Result<StepSequence> {
        load_steps_from_reader(csv.as_bytes())
    }

    #[test]
    fn loads_steps_in_file_order() {
        let steps = load(
            "action,locator_type,locator,value\n\
             open_url,,,https://shop.example.com/\n\
             click,css,a[href='/account'],\n\
             enter_text,id,CustomerEmail,jane@example.com\n",
        )
        .unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps.steps()[0].action, Action::OpenUrl);
        assert_eq!(steps.steps()[1].locator, "a[href='/account']");
        assert_eq!(steps.steps()[2].value, "jane@example.com");
    }

    #[test]
    fn column_order_is_irrelevant() {
        let reordered = load(
            "value,locator,action,locator_type\n\
             https://shop.example.com/,,open_url,\n\
             ,a[href='/account'],click,css\n",
        )
        .unwrap();
        let canonical = load(
            "action,locator_type,locator,value\n\
             open_url,,,https://shop.example.com/\n\
             click,css,a[href='/account'],\n",
        )
        .unwrap();
        assert_eq!(reordered, canonical);
    }

    #[test]
    fn missing_optional_columns_default_to_empty() {
        let steps = load("action,value\nopen_url,https://shop.example.com/\nsleep,\n").unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps.steps()[0].locator_type, "");
        assert_eq!(steps.steps()[0].locator, "");
        assert_eq!(steps.steps()[1].value, "");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let steps = load(
            "action,locator_type,locator,value,comment\n\
             click,id,checkout,,takes us to payment\n",
        )
        .unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps.steps()[0].locator, "checkout");
    }

    #[test]
    fn missing_action_column_is_a_format_error() {
        let err = load("locator_type,locator,value\ncss,.btn,\n").unwrap_err();
        assert!(matches!(err, Error::DataFormat(_)));
        assert!(err.to_string().contains("action"));
    }

    #[test]
    fn unknown_action_names_the_keyword_and_row() {
        let err = load(
            "action,locator_type,locator,value\n\
             open_url,,,https://shop.example.com/\n\
             drag_and_drop,css,.tile,\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedAction(_)));
        let message = err.to_string();
        assert!(message.contains("drag_and_drop"));
        assert!(message.contains("step 2"));
    }

    #[test]
    fn element_action_without_locator_fails_at_load() {
        let err = load("action,locator_type,locator,value\nclick,,,\n").unwrap_err();
        assert!(matches!(err, Error::Locator(_)));
    }

    #[test]
    fn duplicate_steps_are_preserved() {
        let steps = load(
            "action,locator_type,locator,value\n\
             click,id,qty-plus,\n\
             click,id,qty-plus,\n\
             click,id,qty-plus,\n",
        )
        .unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps.steps()[0], steps.steps()[2]);
    }

    #[test]
    fn cells_are_trimmed() {
        let steps = load("action,locator_type,locator,value\n click , id , cart ,\n").unwrap();
        assert_eq!(steps.steps()[0].action, Action::Click);
        assert_eq!(steps.steps()[0].locator, "cart");
    }

    #[test]
    fn strict_validation_catches_deferred_errors() {
        let steps = load(
            "action,locator_type,locator,value\n\
             click,shadow_dom,.panel,\n",
        )
        .unwrap();
        let err = validate_strict(&steps).unwrap_err();
        assert!(err.to_string().contains("shadow_dom"));

        let steps = load("action,locator_type,locator,value\nsleep,,,soon\n").unwrap();
        assert!(validate_strict(&steps).is_err());

        let steps = load(
            "action,locator_type,locator,value\n\
             open_url,,,https://shop.example.com/\n\
             sleep,,,2.5\n\
             scroll_by,,,300\n\
             zoom,,,80\n",
        )
        .unwrap();
        validate_strict(&steps).unwrap();
    }
}
