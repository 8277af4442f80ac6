use exodus_lookup::config::{CreateOptions, DEFAULT_LARGE_MODEL, LARGE_MODEL_ENV};
use exodus_lookup::prelude::*;
use serial_test::serial;

fn with_env<R>(value: Option<&str>, f: impl FnOnce() -> R) -> R {
    // SAFETY: every test touching the variable is #[serial].
    unsafe {
        match value {
            Some(v) => std::env::set_var(LARGE_MODEL_ENV, v),
            None => std::env::remove_var(LARGE_MODEL_ENV),
        }
    }
    let out = f();
    unsafe { std::env::remove_var(LARGE_MODEL_ENV) };
    out
}

#[test]
#[serial]
fn environment_selects_the_model_when_options_do_not() {
    let defaults = CreateOptions::default();
    assert!(!with_env(Some("no"), || defaults.resolve_large_model()));
    assert!(with_env(Some("yes"), || defaults.resolve_large_model()));
    assert_eq!(
        with_env(None, || defaults.resolve_large_model()),
        DEFAULT_LARGE_MODEL
    );
}

#[test]
#[serial]
fn explicit_options_override_the_environment() {
    let large = CreateOptions {
        large_model: true,
        ..Default::default()
    };
    let normal = CreateOptions {
        normal_model: true,
        ..Default::default()
    };
    let both = CreateOptions {
        large_model: true,
        normal_model: true,
        ..Default::default()
    };
    with_env(Some("n"), || assert!(large.resolve_large_model()));
    with_env(Some("y"), || {
        assert!(!normal.resolve_large_model());
        assert!(!both.resolve_large_model());
    });
}

#[test]
#[serial]
fn created_files_record_the_model() {
    let mut st = MemoryStorage::new();
    let f = with_env(Some("NO"), || st.create(&CreateOptions::default()));
    let g = with_env(None, || st.create(&CreateOptions::default()));
    let s = Session::new(st);
    assert!(!s.large_model(f));
    assert_eq!(s.large_model(g), DEFAULT_LARGE_MODEL);
}

#[test]
fn options_round_trip_through_json() -> Result<(), serde_json::Error> {
    let options = CreateOptions {
        large_model: false,
        normal_model: true,
        double_precision: true,
    };
    let json = serde_json::to_string(&options)?;
    assert_eq!(serde_json::from_str::<CreateOptions>(&json)?, options);

    let params = BlockParams {
        entries: 4,
        nodes_per_entry: 8,
        attributes: 1,
    };
    let value = serde_json::to_value(params)?;
    assert_eq!(value["nodes_per_entry"], 8);
    Ok(())
}
