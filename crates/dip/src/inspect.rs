//! Match inspection
//!
//! Registers views by name against a memory document and reports which
//! elements each would bind to, without running any constructor. Backs the
//! `dip` binary.

use dip_application::{Application, ViewMatch};
use dip_domain::error::Result;
use dip_domain::value_objects::{DataAttributes, ProviderSpec};
use dip_infrastructure::document::MemoryDocument;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// One element a view would bind to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    /// View name
    pub view: String,
    /// `.selector` or `[selector]`
    pub marker: String,
    /// Tag of the bound element
    pub tag: String,
    /// Data attributes the constructor would receive
    pub data: DataAttributes,
}

impl MatchReport {
    fn from_match(view_match: &ViewMatch) -> Self {
        Self {
            view: view_match.view().to_string(),
            marker: view_match.marker().to_string(),
            tag: MemoryDocument::element(view_match.element())
                .map(|e| e.tag().to_string())
                .unwrap_or_default(),
            data: view_match.data().clone(),
        }
    }
}

/// Compile `views` against `document` and report the matches in
/// activation order
pub fn inspect<S: AsRef<str>>(
    document: Arc<MemoryDocument>,
    views: &[S],
) -> Result<Vec<MatchReport>> {
    let app = Application::new("inspect");
    for name in views {
        app.view(name.as_ref(), ProviderSpec::constructor(|_| Ok(())))?;
    }
    app.attach_host(document);

    let activation = app.compile(None)?;
    let reports: Vec<MatchReport> = activation
        .matches()
        .iter()
        .map(MatchReport::from_match)
        .collect();
    info!(views = views.len(), matches = reports.len(), "Inspected document");
    Ok(reports)
}
