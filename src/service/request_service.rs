use crate::router::Router;
use crate::RouteError;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{service::Service, Request, Response};
use log::info;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

/// A per-connection [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) which dispatches every
/// request of the connection through the shared router.
///
/// Routing failures never surface as service errors, they are always answered with a response.
pub struct RequestService<B, E> {
    pub(crate) router: Arc<Router<B, E>>,
    pub(crate) remote_addr: SocketAddr,
}

impl<B, E> RequestService<B, E> {
    /// The address of the peer this service is answering.
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }
}

impl<B, E> Service<Request<B>> for RequestService<B, E>
where
    B: Send + 'static,
    E: Into<RouteError> + 'static,
{
    type Response = Response<Full<Bytes>>;
    type Error = Infallible;
    #[allow(clippy::type_complexity)]
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<B>) -> Self::Future {
        let router = self.router.clone();
        let remote_addr = self.remote_addr;

        let fut = async move {
            info!("{} {} {}", remote_addr, req.method(), req.uri());

            Ok(router.dispatch(req).await)
        };

        Box::pin(fut)
    }
}

#[derive(Debug)]
pub struct RequestServiceBuilder<B, E> {
    router: Arc<Router<B, E>>,
}

impl<B: Send + 'static, E: Into<RouteError> + 'static> RequestServiceBuilder<B, E> {
    pub fn new(router: Router<B, E>) -> Self {
        Self {
            router: Arc::from(router),
        }
    }

    pub fn build(&self, remote_addr: SocketAddr) -> RequestService<B, E> {
        RequestService {
            router: self.router.clone(),
            remote_addr,
        }
    }
}
