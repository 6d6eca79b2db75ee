use crate::router::Router;
use crate::service::request_service::{RequestService, RequestServiceBuilder};
use crate::RouteError;
use hyper::service::Service;
use std::convert::Infallible;
use std::future::{ready, Ready};
use tokio::net::TcpStream;

/// A [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) which creates a
/// [RequestService](./struct.RequestService.html) for each accepted connection.
///
/// This `RouterService<B, E>` type accepts two type parameters: `B` and `E`.
///
/// * The `B` represents the request body type handed to the route handlers. For a server it is
///   [hyper::body::Incoming](https://docs.rs/hyper/1/hyper/body/struct.Incoming.html).
/// * The `E` represents any error type which will be used by route handlers.
///
/// Most applications don't need it directly, [Server](./struct.Server.html) drives it. It is public for embedding the
/// router into a hand written accept loop.
///
/// # Examples
///
/// ```no_run
/// use http_body_util::Full;
/// use hyper::body::{Bytes, Incoming};
/// use hyper::service::Service;
/// use hyper::{Request, Response};
/// use hyper_util::rt::{TokioExecutor, TokioIo};
/// use hyper_util::server::conn::auto::Builder;
/// use restrouter::{RouteParams, Router, RouterService};
/// use std::convert::Infallible;
/// use std::net::SocketAddr;
/// use std::sync::Arc;
/// use tokio::net::TcpListener;
///
/// async fn home(_: Request<Incoming>, _: RouteParams) -> Result<Response<Full<Bytes>>, Infallible> {
///     Ok(Response::new(Full::new(Bytes::from("Home page"))))
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let router: Router<Incoming, Infallible> = Router::builder().get("/", home).build()?;
///     let service = Arc::new(RouterService::new(router));
///
///     let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
///     let listener = TcpListener::bind(addr).await?;
///
///     loop {
///         let (stream, _) = listener.accept().await?;
///         let router_service = service.clone();
///
///         tokio::spawn(async move {
///             let request_service = match router_service.call(&stream).await {
///                 Ok(svc) => svc,
///                 Err(never) => match never {},
///             };
///
///             let io = TokioIo::new(stream);
///             let builder = Builder::new(TokioExecutor::new());
///             if let Err(err) = builder.serve_connection(io, request_service).await {
///                 eprintln!("Error serving connection: {:?}", err);
///             }
///         });
///     }
/// }
/// ```
#[derive(Debug)]
pub struct RouterService<B, E> {
    builder: RequestServiceBuilder<B, E>,
}

impl<B: Send + 'static, E: Into<RouteError> + 'static> RouterService<B, E> {
    /// Creates a new service with the provided router, ready to hand out per-connection request services.
    pub fn new(router: Router<B, E>) -> RouterService<B, E> {
        let builder = RequestServiceBuilder::new(router);
        RouterService { builder }
    }
}

impl<B: Send + 'static, E: Into<RouteError> + 'static> Service<&TcpStream> for RouterService<B, E> {
    type Response = RequestService<B, E>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, conn: &TcpStream) -> Self::Future {
        let addr = match conn.peer_addr() {
            Ok(addr) => addr,
            Err(_) => std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
        };
        let req_service = self.builder.build(addr);

        ready(Ok(req_service))
    }
}
