//! Serving over TLS with a PEM certificate from disk.

use std::path::Path;

use ai_proxy::config::{ProxyConfig, RouteConfig, TlsConfig};

mod common;

use common::{API_KEY, proxy_config, start_proxy, start_recording_backend};

fn tls_config(routes: Vec<RouteConfig>) -> ProxyConfig {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let mut config = proxy_config(routes);
    config.listener.tls = Some(TlsConfig {
        cert_path: fixtures.join("cert.pem").display().to_string(),
        key_path: fixtures.join("key.pem").display().to_string(),
    });
    config
}

fn tls_client() -> reqwest::Client {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_root_over_tls() {
    let proxy = start_proxy(tls_config(vec![])).await;

    let response = tls_client()
        .get(format!("https://{}/", proxy.addr))
        .send()
        .await
        .expect("TLS listener unreachable");

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.text().await.unwrap(),
        "A proxy for AI! Use /{api_key}/{provider} to access the API."
    );
}

#[tokio::test]
async fn test_forwarding_over_tls() {
    let (upstream, mut seen) = start_recording_backend(200, "ok").await;
    let proxy = start_proxy(tls_config(vec![RouteConfig::new(
        "openai",
        format!("http://{}", upstream),
    )]))
    .await;

    let response = tls_client()
        .post(format!("https://{}/{}/openai/v1/chat/completions", proxy.addr, API_KEY))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(seen.recv().await.unwrap().uri, "/v1/chat/completions");
}
