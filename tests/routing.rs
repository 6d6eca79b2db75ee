use self::support::{into_text, serve};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::{Request, Response, StatusCode};
use restrouter::{Error, RouteParams, Router};
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mod support;

fn echo_params(params: &RouteParams) -> String {
    let mut pairs: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    pairs.sort();
    pairs.join("&")
}

#[tokio::test]
async fn can_dispatch_user_by_id() {
    let hits = Arc::new(AtomicUsize::new(0));
    let handler_hits = hits.clone();

    let router: Router<Incoming, Infallible> = Router::builder()
        .get("/users/:id", move |_: Request<Incoming>, params: RouteParams| {
            handler_hits.fetch_add(1, Ordering::SeqCst);
            async move { Ok(Response::new(Full::from(echo_params(&params)))) }
        })
        .build()
        .unwrap();
    let serve = serve(router).await;

    let resp = serve.request("GET", "/users/42").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(into_text(resp.into_body()).await, "id=42");

    let resp = serve.request("GET", "/users/abc").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(into_text(resp.into_body()).await, "");

    let resp = serve.request("POST", "/users/42").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    serve.shutdown().await;
}

#[tokio::test]
async fn can_bind_multiple_params() {
    let router: Router<Incoming, Infallible> = Router::builder()
        .get("/users/:userId/books/:bookId", |_, params: RouteParams| async move {
            Ok(Response::new(Full::from(echo_params(&params))))
        })
        .build()
        .unwrap();
    let serve = serve(router).await;

    let resp = serve.request("GET", "/users/12/books/7?format=json").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(into_text(resp.into_body()).await, "bookId=7&userId=12");

    let resp = serve.request("GET", "/users/12/books/seven").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = serve.request("GET", "/users/12/books/7/pages").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    serve.shutdown().await;
}

#[tokio::test]
async fn first_registered_route_wins() {
    let router: Router<Incoming, Infallible> = Router::builder()
        .get("/users/special", |_, _| async move { Ok(Response::new(Full::from("special"))) })
        .get("/users/:id", |_, _| async move { Ok(Response::new(Full::from("by id"))) })
        .get("/users/0", |_, _| async move { Ok(Response::new(Full::from("unreachable"))) })
        .build()
        .unwrap();
    let serve = serve(router).await;

    let resp = serve.request("GET", "/users/special").await;
    assert_eq!(into_text(resp.into_body()).await, "special");

    let resp = serve.request("GET", "/users/0").await;
    assert_eq!(into_text(resp.into_body()).await, "by id");

    serve.shutdown().await;
}

#[tokio::test]
async fn unknown_method_is_not_found() {
    let router: Router<Incoming, Infallible> = Router::builder()
        .get("/", |_, _| async move { Ok(Response::new(Full::from("home"))) })
        .build()
        .unwrap();
    let serve = serve(router).await;

    for method in ["HEAD", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"] {
        let resp = serve.request(method, "/").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", method);
    }

    let resp = serve.request("GET", "/").await;
    assert_eq!(resp.status(), StatusCode::OK);

    serve.shutdown().await;
}

#[tokio::test]
async fn methods_are_case_insensitive() {
    let router: Router<Incoming, Infallible> = Router::builder()
        .add("purge", "/cache/:key", |_, params: RouteParams| async move {
            Ok(Response::new(Full::from(echo_params(&params))))
        })
        .build()
        .unwrap();
    let serve = serve(router).await;

    let resp = serve.request("PURGE", "/cache/9").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(into_text(resp.into_body()).await, "key=9");

    serve.shutdown().await;
}

#[derive(Debug)]
struct ApiError(&'static str);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ApiError {}

#[tokio::test]
async fn handler_errors_are_contained() {
    let router: Router<Incoming, ApiError> = Router::builder()
        .get("/fail", |_, _| async move { Err(ApiError("database is down")) })
        .get("/ok", |_, _| async move { Ok(Response::new(Full::from("fine"))) })
        .err_handler(|err: Error| async move {
            let mut resp = Response::new(Full::new(Bytes::from(format!("Something went wrong: {}", err))));
            *resp.status_mut() = err.status_code();
            resp
        })
        .build()
        .unwrap();
    let serve = serve(router).await;

    let resp = serve.request("GET", "/fail").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        into_text(resp.into_body()).await,
        "Something went wrong: Handler error: database is down"
    );

    let resp = serve.request("GET", "/ok").await;
    assert_eq!(resp.status(), StatusCode::OK);

    serve.shutdown().await;
}

#[test]
fn malformed_templates_stop_the_build() {
    let result: restrouter::Result<Router<Incoming, Infallible>> = Router::builder()
        .get("/orders/:id/lines/:id", |_, _| async move { Ok(Response::new(Full::from(""))) })
        .build();

    let err = result.unwrap_err();
    assert!(err.is_registration_error());
    assert!(matches!(err, Error::InvalidPath { .. }));
}

#[tokio::test]
async fn concurrent_requests_get_their_own_params() {
    let router: Router<Incoming, Infallible> = Router::builder()
        .get("/orders/:orderId/lines/:lineId", |_, params: RouteParams| async move {
            tokio::task::yield_now().await;
            Ok(Response::new(Full::from(echo_params(&params))))
        })
        .build()
        .unwrap();
    let serve = serve(router).await;

    let requests = (0..32).map(|i| {
        let serve = &serve;
        async move {
            let resp = serve.request("GET", &format!("/orders/{}/lines/{}", i, i * 10)).await;
            (i, into_text(resp.into_body()).await)
        }
    });

    for (i, body) in futures::future::join_all(requests).await {
        assert_eq!(body, format!("lineId={}&orderId={}", i * 10, i));
    }

    serve.shutdown().await;
}
