//! End-to-end tests for the keyword runner library
//!
//! These load CSV fixtures the way the CLI does, run them against the
//! in-memory mock handle, and verify call ordering, fail-fast behavior,
//! and data-driven substitution.

use std::io::Write;
use std::path::PathBuf;

use webstep::driver::mock::MockHandle;
use webstep::keyword::{data, loader, runner};
use webstep::Error;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[tokio::test]
async fn login_scenario_drives_the_handle_in_file_order() {
    let steps = loader::load_steps(&fixture("login.csv")).unwrap();
    let handle = MockHandle::new()
        .with_text(".account-greeting", "Hello Jane, welcome back")
        .with_title("Account — Market99");

    runner::run(&handle, &steps).await.unwrap();

    assert_eq!(
        handle.calls(),
        vec![
            "navigate https://shop.example.com/",
            "click css='a[href='/account']'",
            "click id='loginWithEmailButton'",
            "enter_text id='CustomerEmail' \"jane@example.com\"",
            "enter_text id='CustomerPassword' \"correct horse\"",
            "click xpath='//button[@type='submit']'",
            "text_of css='.account-greeting'",
            "title",
        ]
    );
}

#[test]
fn column_order_does_not_change_the_loaded_steps() {
    let canonical = loader::load_steps(&fixture("search.csv")).unwrap();
    let reordered = loader::load_steps(&fixture("search_reordered.csv")).unwrap();
    assert_eq!(canonical, reordered);
}

#[tokio::test(start_paused = true)]
async fn home_actions_scenario_emits_the_expected_scripts() {
    let steps = loader::load_steps(&fixture("home_actions.csv")).unwrap();
    let handle = MockHandle::new();

    runner::run(&handle, &steps).await.unwrap();

    assert_eq!(
        handle.calls(),
        vec![
            "navigate https://shop.example.com/",
            "execute_js document.body.style.zoom='150%';",
            "execute_js document.body.style.zoom='100%';",
            "execute_js window.scrollBy(0, 300);",
            "execute_js window.scrollTo(0, 0);",
        ]
    );
}

#[tokio::test]
async fn data_records_parameterize_the_scenario() {
    let steps = loader::load_steps(&fixture("checkout.csv")).unwrap();
    let records = data::load_records(&fixture("customers.csv")).unwrap();
    assert_eq!(records.len(), 2);

    for record in &records {
        let email = record.get("email").unwrap().clone();
        let postal = record.get("postal_code").unwrap().clone();

        let handle = MockHandle::new().with_text(".order-summary", &format!("Order for {email}"));
        let applied = data::apply_record(&steps, record);
        runner::run(&handle, &applied).await.unwrap();

        let calls = handle.calls();
        assert_eq!(calls[1], format!("enter_text id='CheckoutEmail' \"{email}\""));
        assert_eq!(calls[2], format!("enter_text id='CheckoutPostal' \"{postal}\""));
    }
}

#[tokio::test]
async fn a_failing_assertion_stops_the_scenario() {
    let steps = loader::load_steps(&fixture("login.csv")).unwrap();
    // greeting present but for the wrong customer, title never checked
    let handle = MockHandle::new()
        .with_text(".account-greeting", "Hello Pratyush")
        .with_title("Account — Market99");

    let err = runner::run(&handle, &steps).await.unwrap_err();
    match err {
        Error::StepFailed { step, source, .. } => {
            assert_eq!(step, 7);
            assert!(matches!(*source, Error::Assertion { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }

    let calls = handle.calls();
    assert_eq!(calls.last().map(String::as_str), Some("text_of css='.account-greeting'"));
    assert!(!calls.contains(&"title".to_string()));
}

#[test]
fn missing_step_file_is_a_read_error() {
    let err = loader::load_steps(&fixture("does_not_exist.csv")).unwrap_err();
    assert!(matches!(err, Error::FileRead { .. }));
}

#[test]
fn unsupported_action_in_a_file_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "action,locator_type,locator,value").unwrap();
    writeln!(file, "open_url,,,https://shop.example.com/").unwrap();
    writeln!(file, "hover,css,.menu,").unwrap();

    let err = loader::load_steps(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedAction(_)));
    assert!(err.to_string().contains("hover"));
}

#[test]
fn empty_data_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "email,postal_code\n").unwrap();

    let err = data::load_records(&path).unwrap_err();
    assert!(matches!(err, Error::DataFormat(_)));
}
