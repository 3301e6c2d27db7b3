use movies_e2e_tests::{base_url, prepare_env, spawn_server};
use movies_types::StoreKind;
use tracing::info;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_health() {
    let (args, _config_guard) = prepare_env("test_health", StoreKind::Memory)
        .await
        .unwrap();
    let base_url = base_url(&args);

    let _server = spawn_server(args).await.unwrap();

    let client = reqwest::Client::new();

    let url = base_url.join("health").unwrap();
    let response = client.get(url).send().await.unwrap();
    info! {"Response: {:#?}", response};
    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
#[traced_test]
async fn test_api_docs() {
    let (args, _config_guard) = prepare_env("test_api_docs", StoreKind::Memory)
        .await
        .unwrap();
    let base_url = base_url(&args);

    let _server = spawn_server(args).await.unwrap();

    let url = base_url.join("api-docs/openapi.json").unwrap();
    let response = reqwest::get(url).await.unwrap();
    assert!(response.status().is_success());
    let docs: serde_json::Value = response.json().await.unwrap();
    assert!(docs["paths"].get("/movie").is_some());
    assert!(docs["paths"].get("/movie/{id}").is_some());
}
