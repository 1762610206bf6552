//! Selector derivation tests

use dip_domain::value_objects::selector::to_dash_case;
use dip_domain::{Marker, Selector};

#[test]
fn test_camel_case_becomes_dash_case() {
    assert_eq!(Selector::from_name("userCard").as_str(), "user-card");
    assert_eq!(Selector::from_name("fooBarBaz").as_str(), "foo-bar-baz");
}

#[test]
fn test_lowercase_name_is_unchanged() {
    assert_eq!(Selector::from_name("panel").as_str(), "panel");
}

#[test]
fn test_leading_uppercase_is_lowercased_without_hyphen() {
    assert_eq!(to_dash_case("Panel"), "panel");
    assert_eq!(to_dash_case("UserCard"), "user-card");
}

#[test]
fn test_each_uppercase_letter_gets_its_own_hyphen() {
    assert_eq!(to_dash_case("myHTMLView"), "my-h-t-m-l-view");
}

#[test]
fn test_colliding_names_derive_same_selector() {
    assert_eq!(Selector::from_name("userCard"), Selector::from_name("user-card"));
}

#[test]
fn test_markers_carry_selector() {
    let selector = Selector::from_name("userCard");
    assert_eq!(selector.class(), Marker::Class(selector.clone()));
    assert_eq!(selector.attribute().selector(), &selector);
    assert_eq!(selector.class().to_string(), ".user-card");
    assert_eq!(selector.attribute().to_string(), "[user-card]");
}

#[test]
fn test_only_ascii_capitals_are_dash_cased() {
    assert_eq!(to_dash_case("userÉtat"), "userÉtat");
    assert_eq!(to_dash_case("ÉtatCard"), "État-card");
    assert_eq!(Selector::from_name("straßeView").as_str(), "straße-view");
}
