//! Route table mapping URL paths to page components.
//!
//! Components are built once per [`View`]; alias paths point at the same
//! component instead of duplicating it, so aliases cannot drift apart.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::factory::{create_page, pass_through, query_only, Page, PageConfig};
use crate::views::View;

/// The portal's route table, alias paths included.
const PORTAL_ROUTES: &[(&str, View)] = &[
    ("/dataTable2", View::DataTable),
    ("/demo", View::Demo),
    ("/geneCorrelations", View::Correlations),
    ("/correlations", View::Correlations),
    ("/geneExpression", View::GeneExpression),
    ("/mRNAData", View::GeneExpression),
    ("/geneMutations", View::Mutations),
    ("/home", View::Home),
    ("/mRNATable", View::MrnaTable),
    ("/molecular", View::File),
    ("/file", View::File),
    ("/mutationTable", View::MutationTable),
    ("/sampleTable", View::SampleTable),
    ("/summaryTable", View::SampleTable),
    ("/tabular", View::Tabular),
    ("/api-docs/score", View::ScoreDocs),
];

/// Errors that can occur while building a route table.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route already registered: {0}")]
    DuplicatePath(String),

    #[error("Component already registered for view {0:?}")]
    DuplicateComponent(View),

    #[error("No component registered for view {0:?}")]
    MissingComponent(View),

    #[error("Route path must start with '/': {0}")]
    InvalidPath(String),
}

/// Path to component mapping.
#[derive(Debug, Default)]
pub struct RouteTable {
    /// Registered paths, sorted
    routes: BTreeMap<String, View>,

    /// One component per view
    components: HashMap<View, Arc<Page>>,
}

impl RouteTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the portal's route table.
    pub fn portal() -> Result<Self, RouteError> {
        let mut table = Self::new();

        for view in View::ALL {
            table.component(view, standard_page(view))?;
        }

        for (path, view) in PORTAL_ROUTES {
            table.route(*path, *view)?;
        }

        Ok(table)
    }

    /// Register the component for a view.
    pub fn component(&mut self, view: View, page: Page) -> Result<(), RouteError> {
        if self.components.contains_key(&view) {
            return Err(RouteError::DuplicateComponent(view));
        }
        self.components.insert(view, Arc::new(page));
        Ok(())
    }

    /// Mount a registered view's component under a path.
    pub fn route(&mut self, path: impl Into<String>, view: View) -> Result<(), RouteError> {
        let path = path.into();

        if !path.starts_with('/') {
            return Err(RouteError::InvalidPath(path));
        }
        if !self.components.contains_key(&view) {
            return Err(RouteError::MissingComponent(view));
        }
        if self.routes.contains_key(&path) {
            return Err(RouteError::DuplicatePath(path));
        }

        self.routes.insert(path, view);
        Ok(())
    }

    /// Look up the component mounted at a path.
    pub fn resolve(&self, path: &str) -> Option<&Arc<Page>> {
        self.routes
            .get(path)
            .and_then(|view| self.components.get(view))
    }

    pub fn view_for(&self, path: &str) -> Option<View> {
        self.routes.get(path).copied()
    }

    /// All mounted paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Every path mounting the given view.
    pub fn paths_for(&self, view: View) -> Vec<&str> {
        self.routes
            .iter()
            .filter(|(_, v)| **v == view)
            .map(|(path, _)| path.as_str())
            .collect()
    }

    /// Number of mounted paths.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Every portal view is public; the home page also mounts the alerts banner.
fn standard_page(view: View) -> Page {
    let config = match view {
        View::ScoreDocs => PageConfig::new(query_only),
        _ => PageConfig::new(pass_through),
    }
    .public()
    .title(view.title());

    let config = if view == View::Home {
        config.with_alerts()
    } else {
        config
    };

    create_page(config, move |props| view.render(props))
}
