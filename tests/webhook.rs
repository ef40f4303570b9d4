use std::net::TcpListener;
use std::time::Duration;

use assert_matches::assert_matches;
use slackhook::{Client, ClientConfig, Error, Message};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// reqwest's blocking client must stay off the async runtime threads.
async fn blocking<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    tokio::task::spawn_blocking(f).await.expect("blocking task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn simple_posts_json_and_accepts_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({ "text": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/hook", server.uri());
    let res = blocking(move || Client::new(url).simple("hello")).await;

    assert!(res.is_ok(), "{res:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn optional_fields_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_json(serde_json::json!({
            "text": "hi",
            "channel": "#general",
            "icon_emoji": ":robot_face:",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/hook", server.uri());
    let res = blocking(move || {
        Client::new(url).send(&Message::new("hi").channel("#general").icon_emoji(":robot_face:"))
    })
    .await;

    assert!(res.is_ok(), "{res:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/hook", server.uri());
    let res = blocking(move || Client::new(url).simple("boom")).await;

    assert_matches!(res, Err(Error::UnexpectedStatus(500)));
}

#[tokio::test(flavor = "multi_thread")]
async fn client_is_reused_across_sends() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(3)
        .mount(&server)
        .await;

    let url = format!("{}/hook", server.uri());
    let results = blocking(move || {
        let client = Client::new(url);
        (0..3).map(|i| client.simple(&format!("n={i}"))).collect::<Vec<_>>()
    })
    .await;

    assert!(results.iter().all(|r| r.is_ok()));
}

#[tokio::test(flavor = "multi_thread")]
async fn configured_client_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let url = format!("{}/hook", server.uri());
    let res = blocking(move || {
        let cfg = ClientConfig {
            timeout: Some(Duration::from_millis(200)),
            ..ClientConfig::default()
        };
        Client::with_config(url, &cfg)?.simple("slow")
    })
    .await;

    let inner = assert_matches!(res, Err(Error::Transport(inner)) => inner);
    let reqwest_err = inner.downcast_ref::<reqwest::Error>().expect("reqwest error");
    assert!(reqwest_err.is_timeout());
}

#[test]
fn connection_refused_is_a_transport_error() {
    // grab a free port, then close it so nothing is listening
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let res = Client::new(format!("http://127.0.0.1:{port}/hook")).simple("hello");

    let inner = assert_matches!(res, Err(Error::Transport(inner)) => inner);
    let reqwest_err = inner.downcast_ref::<reqwest::Error>().expect("reqwest error");
    assert!(reqwest_err.is_connect());
}
