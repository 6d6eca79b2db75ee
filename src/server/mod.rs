use crate::router::Router;
use crate::service::RouterService;
use crate::{Error, RouteError};
use hyper::body::Incoming;
use hyper::service::Service;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use log::{info, warn};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

pub use self::config::{ServerConfig, ADDR_ENV_VAR};

mod config;

/// A bound HTTP server ready to serve a [Router](./struct.Router.html).
///
/// Every accepted connection is served on its own tokio task, all of them sharing the same read-only router.
///
/// # Examples
///
/// ```no_run
/// use http_body_util::Full;
/// use hyper::body::{Bytes, Incoming};
/// use hyper::{Request, Response};
/// use restrouter::{RouteParams, Router, Server, ServerConfig};
/// use std::convert::Infallible;
///
/// async fn home(_: Request<Incoming>, _: RouteParams) -> Result<Response<Full<Bytes>>, Infallible> {
///     Ok(Response::new(Full::from("Home page")))
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), restrouter::Error> {
///     let router: Router<Incoming, Infallible> = Router::builder().get("/", home).build()?;
///
///     let server = Server::bind(ServerConfig::from_env()?).await?;
///     println!("App is running on: {}", server.local_addr()?);
///
///     server.serve(router).await
/// }
/// ```
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    config: ServerConfig,
}

impl Server {
    /// Binds the listening socket described by `config`.
    ///
    /// Failing to bind, e.g. because the address is already in use, yields [Error::Bind](./enum.Error.html#variant.Bind).
    pub async fn bind(config: ServerConfig) -> crate::Result<Server> {
        let listener = TcpListener::bind(config.addr)
            .await
            .map_err(|source| Error::Bind {
                addr: config.addr,
                source,
            })?;

        info!("Starting HTTP service on {}", listener.local_addr()?);

        Ok(Server { listener, config })
    }

    /// The address the server is actually listening on.
    pub fn local_addr(&self) -> crate::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves `router` until the process exits.
    pub async fn serve<E>(self, router: Router<Incoming, E>) -> crate::Result<()>
    where
        E: Into<RouteError> + 'static,
    {
        self.serve_with_shutdown(router, std::future::pending()).await
    }

    /// Serves `router` until `signal` resolves.
    ///
    /// Once the signal fires no new connections are accepted. Connections already accepted are left to finish on
    /// their own tasks.
    pub async fn serve_with_shutdown<E, F>(self, router: Router<Incoming, E>, signal: F) -> crate::Result<()>
    where
        E: Into<RouteError> + 'static,
        F: Future<Output = ()> + Send,
    {
        let router_service = Arc::new(RouterService::new(router));
        let keep_alive = self.config.keep_alive;
        let mut signal = std::pin::pin!(signal);

        loop {
            tokio::select! {
                _ = &mut signal => {
                    info!("Shutting down HTTP service on {}", self.local_addr()?);
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    let (stream, _) = match accepted {
                        Ok(conn) => conn,
                        Err(err) => {
                            warn!("Error accepting connection: {}", err);
                            tokio::time::sleep(Duration::from_millis(100)).await;
                            continue;
                        }
                    };

                    let router_service = router_service.clone();

                    tokio::spawn(async move {
                        let request_service = match router_service.call(&stream).await {
                            Ok(svc) => svc,
                            Err(never) => match never {},
                        };

                        let io = TokioIo::new(stream);
                        let mut builder = Builder::new(TokioExecutor::new());
                        builder.http1().keep_alive(keep_alive);

                        if let Err(err) = builder.serve_connection(io, request_service).await {
                            warn!("Error serving connection: {:?}", err);
                        }
                    });
                }
            }
        }
    }
}

/// Binds `addr` and serves `router` on it, blocking until the process exits.
///
/// Any startup failure is returned to the caller, which is expected to treat it as fatal.
pub async fn serve<E>(addr: SocketAddr, router: Router<Incoming, E>) -> crate::Result<()>
where
    E: Into<RouteError> + 'static,
{
    Server::bind(ServerConfig::new(addr)).await?.serve(router).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_fail_to_bind_used_address() {
        let first = Server::bind(ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0))))
            .await
            .unwrap();
        let addr = first.local_addr().unwrap();

        match Server::bind(ServerConfig::new(addr)).await {
            Err(Error::Bind { addr: failed, .. }) => assert_eq!(failed, addr),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
