//! Page factory, views and route table for the genomics portal.
//!
//! Every route page is built once by [`create_page`] from a props fetcher and a
//! render function, then mounted under one or more paths in a [`RouteTable`].

pub mod context;
pub mod factory;
pub mod routes;
pub mod templates;
pub mod views;

pub use context::{PageContext, Query, QueryValue};
pub use factory::{
    create_page, pass_through, query_only, Page, PageConfig, PageError, Props, RenderedPage,
};
pub use routes::{RouteError, RouteTable};
pub use templates::{AlertLevel, Layout, SiteConfig, SystemAlert};
pub use views::View;
