#![allow(dead_code)]

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::Response;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use restrouter::{RouteError, Router, Server, ServerConfig};
use std::net::SocketAddr;
use tokio::sync::oneshot::{self, Sender};
use tokio::task::JoinHandle;

pub struct Serve {
    addr: SocketAddr,
    tx: Sender<()>,
    handle: JoinHandle<restrouter::Result<()>>,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl Serve {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn new_request(&self, method: &str, route: &str) -> http::request::Builder {
        http::request::Request::builder()
            .method(method)
            .uri(format!("http://{}{}", self.addr(), route))
    }

    pub async fn request(&self, method: &str, route: &str) -> Response<Incoming> {
        self.request_with_body(method, route, "").await
    }

    pub async fn request_with_body(&self, method: &str, route: &str, body: &'static str) -> Response<Incoming> {
        let req = self.new_request(method, route).body(Full::from(body)).unwrap();
        self.client.request(req).await.unwrap()
    }

    pub async fn shutdown(self) {
        self.tx.send(()).unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

pub async fn serve<E>(router: Router<Incoming, E>) -> Serve
where
    E: Into<RouteError> + 'static,
{
    // Bind to an available port.
    let server = Server::bind(ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0))))
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(server.serve_with_shutdown(router, async move {
        let _ = rx.await;
    }));

    let client = Client::builder(TokioExecutor::new()).build_http();

    Serve { addr, tx, handle, client }
}

pub async fn into_text<B>(body: B) -> String
where
    B: hyper::body::Body<Data = Bytes> + Send,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    String::from_utf8_lossy(&body.collect().await.unwrap().to_bytes()).to_string()
}
