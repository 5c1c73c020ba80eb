//! View components mounted by route pages.
//!
//! The views themselves (tables, correlation plots, mutation viewers) live in
//! the client bundle. Server-side a view is a mount point carrying its props.

use minijinja::HtmlEscape;
use serde_json::Value;

use crate::factory::{PageError, Props};

/// A view component that one or more routes render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum View {
    DataTable,
    Demo,
    Correlations,
    GeneExpression,
    Mutations,
    Home,
    MrnaTable,
    File,
    MutationTable,
    SampleTable,
    Tabular,
    ScoreDocs,
}

impl View {
    pub const ALL: [View; 12] = [
        View::DataTable,
        View::Demo,
        View::Correlations,
        View::GeneExpression,
        View::Mutations,
        View::Home,
        View::MrnaTable,
        View::File,
        View::MutationTable,
        View::SampleTable,
        View::Tabular,
        View::ScoreDocs,
    ];

    /// Identifier the client bundle uses to pick a component.
    pub fn id(self) -> &'static str {
        match self {
            View::DataTable => "data-table",
            View::Demo => "demo",
            View::Correlations => "correlations",
            View::GeneExpression => "gene-expression",
            View::Mutations => "mutations",
            View::Home => "home",
            View::MrnaTable => "mrna-table",
            View::File => "file",
            View::MutationTable => "mutation-table",
            View::SampleTable => "sample-table",
            View::Tabular => "tabular",
            View::ScoreDocs => "score-docs",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::DataTable => "Data Table",
            View::Demo => "Demo",
            View::Correlations => "Gene Correlations",
            View::GeneExpression => "Gene Expression",
            View::Mutations => "Gene Mutations",
            View::Home => "Home",
            View::MrnaTable => "mRNA Table",
            View::File => "Files",
            View::MutationTable => "Mutation Table",
            View::SampleTable => "Sample Table",
            View::Tabular => "Tabular",
            View::ScoreDocs => "Score API",
        }
    }

    /// Render the mount point for this view.
    pub fn render(self, props: &Props) -> Result<String, PageError> {
        let props_json = serde_json::to_string(&Value::Object(props.clone()))
            .map_err(|e| PageError::Render(e.to_string()))?;

        Ok(format!(
            r#"<section class="view" id="view-{id}" data-view="{id}" data-props="{props}">
  <h1>{title}</h1>
  <noscript>This page requires JavaScript.</noscript>
</section>"#,
            id = self.id(),
            title = HtmlEscape(self.title()),
            props = HtmlEscape(&props_json),
        ))
    }
}
