//! Process-wide application table tests

use dip::infrastructure::config::ConfigBuilder;
use dip::{
    ApplicationOptions, ProviderSpec, app, app_names, app_with_options, instance,
    options_from_config,
};

#[test]
fn test_app_is_memoized_per_name() {
    let first = app("apps-memoized");
    first
        .module("shared", ProviderSpec::factory(|_| Ok(instance(1_u8))))
        .expect("module");

    let second = app("apps-memoized");

    assert!(second.get_module("shared").is_some());
    assert!(
        second
            .module("shared", ProviderSpec::factory(|_| Ok(instance(2_u8))))
            .is_err()
    );
}

#[test]
fn test_distinct_names_are_isolated() {
    let a = app("apps-isolated-a");
    let b = app("apps-isolated-b");
    a.module("only-a", ProviderSpec::factory(|_| Ok(instance(()))))
        .expect("module");

    assert!(b.get_module("only-a").is_none());
    let names = app_names();
    assert!(names.contains(&"apps-isolated-a".to_string()));
    assert!(names.contains(&"apps-isolated-b".to_string()));
}

#[test]
fn test_options_apply_on_first_construction_only() {
    let options = ApplicationOptions {
        scope_module: "session".to_string(),
    };
    let created = app_with_options("apps-options", options);
    let again = app_with_options("apps-options", ApplicationOptions::default());

    assert_eq!(created.options().scope_module, "session");
    assert_eq!(again.options().scope_module, "session");
    assert_eq!(app("apps-options").options().scope_module, "session");
}

#[test]
fn test_options_from_config() {
    let config = ConfigBuilder::new()
        .with_scope_module("context")
        .build()
        .expect("valid config");

    assert_eq!(options_from_config(&config).scope_module, "context");
}
