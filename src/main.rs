use bytes::Bytes;
use env_logger::Env;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{header, Request, Response, StatusCode};
use log::error;
use restrouter::{HandlerResult, Resource, RouteParams, Router, Server, ServerConfig};
use std::collections::BTreeMap;
use std::sync::Mutex;

// An in-memory notes store, exposed as a resource at "/notes".
#[derive(Default)]
struct Notes {
    entries: Mutex<BTreeMap<u64, String>>,
}

fn text<S: Into<Bytes>>(status: StatusCode, body: S) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(body.into()));
    *resp.status_mut() = status;
    resp
}

// Route parameters only ever hold digits, but they may still overflow a u64.
fn note_id(params: &RouteParams) -> Option<u64> {
    params.get("id").and_then(|id| id.parse().ok())
}

async fn read_body(req: Request<Incoming>) -> Result<String, hyper::Error> {
    let bytes = req.into_body().collect().await?.to_bytes();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

impl Notes {
    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<u64, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Resource<Incoming, hyper::Error> for Notes {
    async fn list(&self, _: Request<Incoming>, _: RouteParams) -> HandlerResult<hyper::Error> {
        let body = self
            .entries()
            .iter()
            .map(|(id, note)| format!("{}: {}\n", id, note))
            .collect::<String>();
        Ok(text(StatusCode::OK, body))
    }

    async fn create(&self, req: Request<Incoming>, _: RouteParams) -> HandlerResult<hyper::Error> {
        let note = read_body(req).await?;
        let mut entries = self.entries();
        let id = entries.keys().next_back().map_or(1, |last| last + 1);
        entries.insert(id, note);
        Ok(text(StatusCode::CREATED, id.to_string()))
    }

    async fn retrieve(&self, _: Request<Incoming>, params: RouteParams) -> HandlerResult<hyper::Error> {
        let note = note_id(&params).and_then(|id| self.entries().get(&id).cloned());
        Ok(match note {
            Some(note) => text(StatusCode::OK, note),
            None => text(StatusCode::NOT_FOUND, Bytes::new()),
        })
    }

    async fn update(&self, req: Request<Incoming>, params: RouteParams) -> HandlerResult<hyper::Error> {
        let note = read_body(req).await?;
        let Some(id) = note_id(&params) else {
            return Ok(text(StatusCode::NOT_FOUND, Bytes::new()));
        };
        let created = self.entries().insert(id, note).is_none();
        Ok(text(if created { StatusCode::CREATED } else { StatusCode::OK }, Bytes::new()))
    }

    async fn delete(&self, _: Request<Incoming>, params: RouteParams) -> HandlerResult<hyper::Error> {
        let removed = note_id(&params).and_then(|id| self.entries().remove(&id));
        Ok(match removed {
            Some(_) => text(StatusCode::NO_CONTENT, Bytes::new()),
            None => text(StatusCode::NOT_FOUND, Bytes::new()),
        })
    }

    async fn head(&self, _: Request<Incoming>, params: RouteParams) -> HandlerResult<hyper::Error> {
        let exists = note_id(&params).is_some_and(|id| self.entries().contains_key(&id));
        Ok(text(if exists { StatusCode::OK } else { StatusCode::NOT_FOUND }, Bytes::new()))
    }

    async fn patch(&self, req: Request<Incoming>, params: RouteParams) -> HandlerResult<hyper::Error> {
        let suffix = read_body(req).await?;
        let mut entries = self.entries();
        let note = match note_id(&params) {
            Some(id) => entries.get_mut(&id),
            None => None,
        };

        match note {
            Some(note) => {
                note.push_str(&suffix);
                Ok(text(StatusCode::OK, note.clone()))
            }
            None => Ok(text(StatusCode::NOT_FOUND, Bytes::new())),
        }
    }

    async fn options(&self, _: Request<Incoming>, _: RouteParams) -> HandlerResult<hyper::Error> {
        let mut resp = text(StatusCode::NO_CONTENT, Bytes::new());
        resp.headers_mut().insert(
            header::ALLOW,
            header::HeaderValue::from_static("GET, PUT, DELETE, HEAD, PATCH, OPTIONS"),
        );
        Ok(resp)
    }
}

// A handler for "/" page.
async fn home_handler(_: Request<Incoming>, _: RouteParams) -> HandlerResult<hyper::Error> {
    Ok(text(StatusCode::OK, "Home page"))
}

// A handler for "/users/:userId" page.
async fn user_handler(_: Request<Incoming>, params: RouteParams) -> HandlerResult<hyper::Error> {
    let user_id = params.get("userId").map(String::as_str).unwrap_or_default();
    Ok(text(StatusCode::OK, format!("Hello {}", user_id)))
}

fn router() -> restrouter::Result<Router<Incoming, hyper::Error>> {
    Router::builder()
        .get("/", home_handler)
        .get("/users/:userId", user_handler)
        .resource("/notes", Notes::default())
        .build()
}

async fn run() -> restrouter::Result<()> {
    let router = router()?;
    let server = Server::bind(ServerConfig::from_env()?).await?;
    server.serve(router).await
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        error!("{}", err);
        std::process::exit(1);
    }
}
