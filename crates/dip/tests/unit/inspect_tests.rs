//! Match inspection tests

use dip::inspect::{MatchReport, inspect};
use dip::{ElementSpec, MemoryDocument};
use std::collections::BTreeMap;
use std::sync::Arc;

#[test]
fn test_inspect_reports_matches_in_order() {
    let document = Arc::new(MemoryDocument::new(
        ElementSpec::new("main")
            .with_child(
                ElementSpec::new("section")
                    .with_class("user-card")
                    .with_data("user-id", "7"),
            )
            .with_child(ElementSpec::new("aside").with_attribute("panel", "")),
    ));

    let reports = inspect(document, &["userCard", "panel", "footer"]).expect("inspect");

    assert_eq!(
        reports,
        vec![
            MatchReport {
                view: "userCard".to_string(),
                marker: ".user-card".to_string(),
                tag: "section".to_string(),
                data: BTreeMap::from([("userId".to_string(), "7".to_string())]),
            },
            MatchReport {
                view: "panel".to_string(),
                marker: "[panel]".to_string(),
                tag: "aside".to_string(),
                data: BTreeMap::new(),
            },
        ]
    );
}

#[test]
fn test_inspect_rejects_duplicate_views() {
    let document = Arc::new(MemoryDocument::new(ElementSpec::new("main")));

    assert!(inspect(document, &["panel", "panel"]).is_err());
}

#[test]
fn test_report_serializes() {
    let report = MatchReport {
        view: "panel".to_string(),
        marker: ".panel".to_string(),
        tag: "div".to_string(),
        data: BTreeMap::new(),
    };

    let json = serde_json::to_value(&report).expect("serialize");

    assert_eq!(json["marker"], ".panel");
    assert_eq!(json["tag"], "div");
}
