use reqwest::{header, Method, StatusCode};

use super::helper::test;

#[tokio::test]
async fn test_index_serves_the_page() {
    test(|helper| async move {
        let response = helper.app.request("/", Method::GET, None::<()>).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(response.text().await.unwrap().contains("app.js"));
    })
    .await;
}

#[tokio::test]
async fn test_script_talks_to_the_same_origin() {
    test(|helper| async move {
        let response = helper.app.request("app.js", Method::GET, None::<()>).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.text().await.unwrap().contains("/api/weather"));
    })
    .await;
}

#[tokio::test]
async fn test_openapi_document_lists_every_path() {
    test(|helper| async move {
        let response = helper
            .app
            .request("api-doc/openapi.json", Method::GET, None::<()>)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let doc: serde_json::Value = response.json().await.unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for path in [
            "/api/weather",
            "/api/weather/{id}",
            "/api/weather/export/{format}",
            "/api/weather/suggest",
            "/api/weather/current",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    })
    .await;
}
