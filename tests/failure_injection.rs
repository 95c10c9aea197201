//! Failure injection tests: deadlines and unreachable upstreams.

use std::time::{Duration, Instant};

use ai_proxy::config::RouteConfig;

mod common;

use common::{API_KEY, client, proxy_config, start_hanging_backend, start_proxy, unused_addr};

#[tokio::test]
async fn test_deadline_yields_gateway_timeout_and_closes_upstream() {
    let (upstream, closed) = start_hanging_backend().await;
    let mut config = proxy_config(vec![RouteConfig::new("openai", format!("http://{}", upstream))]);
    config.upstream.request_timeout_ms = 300;
    let proxy = start_proxy(config).await;

    let start = Instant::now();
    let response = client()
        .post(proxy.url(&format!("/{}/openai/v1/chat/completions", API_KEY)))
        .body("{\"stream\":true}")
        .send()
        .await
        .expect("Proxy unreachable");

    assert!(start.elapsed() >= Duration::from_millis(300));
    assert_eq!(response.status(), 504);
    assert_eq!(response.headers()["x-accel-buffering"], "no");
    assert_eq!(response.text().await.unwrap(), "Request timeout");

    tokio::time::timeout(Duration::from_secs(5), closed)
        .await
        .expect("upstream connection left open after timeout")
        .unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_not_a_timeout() {
    let dead = unused_addr().await;
    let proxy = start_proxy(proxy_config(vec![RouteConfig::new("mistral", format!("http://{}", dead))])).await;

    let response = client()
        .get(proxy.url(&format!("/{}/mistral/v1/models", API_KEY)))
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(response.status(), 502);
    let body = response.text().await.unwrap();
    assert_ne!(body, "Request timeout");
    assert_eq!(body, "Upstream request failed");
}

#[tokio::test]
async fn test_custom_target_has_no_deadline() {
    let (upstream, _closed) = start_hanging_backend().await;
    let mut config = proxy_config(vec![]);
    config.upstream.request_timeout_ms = 200;
    let proxy = start_proxy(config).await;

    let target = format!("http://{}/v1/chat", upstream);
    let pending = client()
        .post(proxy.url(&format!("/{}/custom-model-proxy", API_KEY)))
        .query(&[("url", target.as_str())])
        .body("{}")
        .send();

    let outcome = tokio::time::timeout(Duration::from_secs(1), pending).await;
    assert!(outcome.is_err(), "custom target must not be cut off by the route deadline");
}

#[tokio::test]
async fn test_custom_target_unreachable_propagates() {
    let dead = unused_addr().await;
    let proxy = start_proxy(proxy_config(vec![])).await;

    let target = format!("http://{}/v1/chat", dead);
    let response = client()
        .post(proxy.url(&format!("/{}/custom-model-proxy", API_KEY)))
        .query(&[("url", target.as_str())])
        .body("{}")
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(response.status(), 502);
}
