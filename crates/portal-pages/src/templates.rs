//! Layout chrome shared by every page.

use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};

/// Severity of a system alert shown on the home page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    #[default]
    Info,
    Warning,
    Critical,
}

/// A banner message shown on pages that mount the system-alerts banner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemAlert {
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
}

/// Site-wide values injected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title shown in the header and `<title>`
    pub title: String,

    /// Base URL of the search API consumed by the client bundle
    pub api_url: String,

    /// Document type queried by the data tables
    pub document_type: String,

    /// Search index name
    pub index_name: String,

    /// Target of the header home link
    pub home_link: String,

    /// Active system alerts
    pub alerts: Vec<SystemAlert>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Genomics Portal".to_string(),
            api_url: "http://localhost:5050".to_string(),
            document_type: "file".to_string(),
            index_name: "file_centric".to_string(),
            home_link: "/home".to_string(),
            alerts: vec![],
        }
    }
}

impl SiteConfig {
    /// Values handed to the client bundle, serialized into the page.
    pub fn client_config(&self) -> serde_json::Value {
        serde_json::json!({
            "apiUrl": self.api_url,
            "documentType": self.document_type,
            "indexName": self.index_name,
            "homeLink": self.home_link,
        })
    }
}

/// What a page hands the layout to wrap.
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    /// Page title
    pub title: &'a str,
    /// Rendered view HTML
    pub body: &'a str,
    /// Mount the system-alerts banner
    pub show_alerts: bool,
}

/// Layout renderer using minijinja.
pub struct Layout {
    env: Environment<'static>,
    site: SiteConfig,
}

impl Layout {
    /// Create a layout with the built-in templates.
    pub fn new(site: SiteConfig) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("base.html", BASE_TEMPLATE)?;
        env.add_template("page.html", PAGE_TEMPLATE)?;
        env.add_template("error.html", ERROR_TEMPLATE)?;

        Ok(Self { env, site })
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Wrap a rendered view in the page chrome.
    pub fn render_page(&self, chrome: &Chrome<'_>) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("page.html")?;
        let alerts: &[SystemAlert] = if chrome.show_alerts {
            &self.site.alerts
        } else {
            &[]
        };

        tmpl.render(context! {
            title => chrome.title,
            site_title => &self.site.title,
            home_link => &self.site.home_link,
            client_config => self.client_config_json(),
            alerts => alerts,
            content => chrome.body,
        })
    }

    /// Render an error page with the same chrome.
    pub fn render_error(&self, status: u16, message: &str) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("error.html")?;

        tmpl.render(context! {
            title => format!("Error {}", status),
            site_title => &self.site.title,
            home_link => &self.site.home_link,
            client_config => self.client_config_json(),
            status => status,
            message => message,
        })
    }

    /// Client config as JSON that is safe to embed in a `<script>` element.
    fn client_config_json(&self) -> String {
        self.site.client_config().to_string().replace('<', "\\u003c")
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  <link rel="stylesheet" href="/assets/main.css">
</head>
<body>
  <header class="site-header">
    <a href="{{ home_link }}" class="site-logo">{{ site_title }}</a>
  </header>
  <main class="main">
    {% block content %}{% endblock %}
  </main>
  <script id="__PORTAL_CONFIG__" type="application/json">{{ client_config | safe }}</script>
  <script src="/assets/main.js"></script>
</body>
</html>"##;

const PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
{% if alerts %}
<div class="system-alerts">
{% for alert in alerts %}
  <div class="system-alert system-alert-{{ alert.level }}" role="alert">
    <strong>{{ alert.title }}</strong>
    <p>{{ alert.message }}</p>
  </div>
{% endfor %}
</div>
{% endif %}
{{ content | safe }}
{% endblock %}"##;

const ERROR_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<section class="error-page">
  <h1>{{ status }}</h1>
  <p>{{ message }}</p>
</section>
{% endblock %}"##;
