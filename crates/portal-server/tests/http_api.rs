use std::fs;
use std::path::Path;
use std::sync::Arc;

use portal_pages::{Layout, RouteTable, SiteConfig, SystemAlert};
use portal_server::{build_router, AppState, DocContent, FsDocs};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Lay out a `public/` tree with a docs folder and one static asset.
fn public_dir() -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    let docs = temp.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("song.md"), "# Song\n").unwrap();
    fs::write(docs.join("score.md"), "# Score\n\nUpload and download files.\n").unwrap();
    fs::write(docs.join("logo.svg"), "<svg/>").unwrap();
    fs::write(temp.path().join("robots.txt"), "User-agent: *\n").unwrap();
    temp
}

/// Spin up the HTTP server on an OS-assigned port, returning the base URL.
async fn spawn_test_server(public: &Path) -> String {
    let site = SiteConfig {
        alerts: vec![SystemAlert {
            title: "Data release 4".to_string(),
            message: "New samples are available".to_string(),
            ..Default::default()
        }],
        ..Default::default()
    };
    let state = AppState::new(
        RouteTable::portal().unwrap(),
        Layout::new(site).unwrap(),
        Arc::new(FsDocs::new(public.join("docs"))),
    );
    let app = build_router(Arc::new(state), public);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn docs_endpoint_lists_markdown_files() {
    let public = public_dir();
    let base = spawn_test_server(public.path()).await;

    let resp = reqwest::get(format!("{}/api/docs", base)).await.unwrap();

    assert_eq!(resp.status(), 200);
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("application/json"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!(["score.md", "song.md"]));
}

#[tokio::test]
async fn docs_endpoint_is_idempotent() {
    let public = public_dir();
    let base = spawn_test_server(public.path()).await;

    let first: Value = reqwest::get(format!("{}/api/docs", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second: Value = reqwest::get(format!("{}/api/docs", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn docs_endpoint_without_directory_is_404() {
    let public = tempfile::tempdir().unwrap();
    let base = spawn_test_server(public.path()).await;

    let resp = reqwest::get(format!("{}/api/docs", base)).await.unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Documentation directory not found" }));
}

#[tokio::test]
async fn doc_content_is_rendered() {
    let public = public_dir();
    let base = spawn_test_server(public.path()).await;

    let resp = reqwest::get(format!("{}/api/docs/score.md", base))
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let doc: DocContent = resp.json().await.unwrap();
    assert_eq!(doc.name, "score.md");
    assert!(doc.html.contains("<h1>Score</h1>"));
}

#[tokio::test]
async fn page_renders_query_and_token_into_props() {
    let public = public_dir();
    let base = spawn_test_server(public.path()).await;

    let resp = reqwest::Client::new()
        .get(format!("{}/geneExpression?gene=TP53", base))
        .header("cookie", "EGO_JWT=t")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains(r#"data-view="gene-expression""#));
    assert!(html.contains("TP53"));
    assert!(html.contains("&quot;egoJwt&quot;"));
}

#[tokio::test]
async fn alias_routes_render_the_same_view() {
    let public = public_dir();
    let base = spawn_test_server(public.path()).await;

    for path in ["/molecular", "/file"] {
        let html = reqwest::get(format!("{}{}", base, path))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(html.contains(r#"data-view="file""#), "{}", path);
    }
}

#[tokio::test]
async fn home_mounts_alerts_banner() {
    let public = public_dir();
    let base = spawn_test_server(public.path()).await;

    let home = reqwest::get(format!("{}/home", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let demo = reqwest::get(format!("{}/demo", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(home.contains("Data release 4"));
    assert!(!demo.contains("Data release 4"));
}

#[tokio::test]
async fn root_redirects_to_home() {
    let public = public_dir();
    let base = spawn_test_server(public.path()).await;

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let resp = client.get(format!("{}/", base)).send().await.unwrap();

    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("location").unwrap(), "/home");
}

#[tokio::test]
async fn serves_public_assets() {
    let public = public_dir();
    let base = spawn_test_server(public.path()).await;

    let resp = reqwest::get(format!("{}/robots.txt", base)).await.unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "User-agent: *\n");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let public = public_dir();
    let base = spawn_test_server(public.path()).await;

    let resp = reqwest::get(format!("{}/nonexistent", base)).await.unwrap();

    assert_eq!(resp.status(), 404);
}
