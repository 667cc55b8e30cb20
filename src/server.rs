//! HTTP front end for the policy engine
//!
//! Two routes, both taking JSON bodies:
//! - `POST /load-policies` replaces the active policy set with a JSON array
//! - `POST /evaluate` answers `{principal, action, resource}` with 200 or 403
//!
//! Responses are plain text. A denied request never says why it was denied.

use crate::config::ServerConfig;
use crate::error::{PolicyError, Result};
use crate::iam::{AccessRequest, Policy, PolicyEngine, PolicyStore};
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Incoming};
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};
use validator::Validate;

pub const LOAD_POLICIES_PATH: &str = "/load-policies";
pub const EVALUATE_PATH: &str = "/evaluate";

const MISSING_PARAMETERS: &str = "Missing required parameters";

/// Request handler shared by every connection
#[derive(Clone)]
pub struct PolicyService {
    engine: Arc<PolicyEngine>,
    max_body_bytes: usize,
}

impl PolicyService {
    pub fn new(engine: Arc<PolicyEngine>, max_body_bytes: usize) -> Self {
        PolicyService {
            engine,
            max_body_bytes,
        }
    }

    /// Build a service with an empty store, sized by `config`
    pub fn from_config(config: &ServerConfig) -> Self {
        let store = Arc::new(PolicyStore::new());
        let engine = PolicyEngine::with_cache(store, config.cache_capacity);
        Self::new(Arc::new(engine), config.max_body_bytes)
    }

    pub fn engine(&self) -> &Arc<PolicyEngine> {
        &self.engine
    }

    /// Route one request
    pub async fn handle<B>(&self, req: Request<B>) -> std::result::Result<Response<Full<Bytes>>, Infallible>
    where
        B: Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let path = req.uri().path().to_string();
        debug!(method = %req.method(), path = path.as_str(), "Handling request");

        let response = match (req.method().clone(), path.as_str()) {
            (Method::POST, LOAD_POLICIES_PATH) => self.load_policies(req.into_body()).await,
            (Method::POST, EVALUATE_PATH) => self.evaluate(req.into_body()).await,
            (_, LOAD_POLICIES_PATH) | (_, EVALUATE_PATH) => {
                let mut response = text(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
                response
                    .headers_mut()
                    .insert(ALLOW, HeaderValue::from_static("POST"));
                response
            }
            _ => text(StatusCode::NOT_FOUND, "Not found"),
        };

        Ok(response)
    }

    async fn load_policies<B>(&self, body: B) -> Response<Full<Bytes>>
    where
        B: Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let body = match self.read_body(body).await {
            Ok(body) => body,
            Err(response) => return response,
        };

        if body.iter().all(u8::is_ascii_whitespace) {
            warn!("Rejected policy load: empty body");
            return text(StatusCode::BAD_REQUEST, MISSING_PARAMETERS);
        }

        match serde_json::from_slice::<Option<Vec<Policy>>>(&body) {
            Ok(Some(policies)) => {
                self.engine.load_policies(policies);
                text(StatusCode::OK, "Policies loaded successfully")
            }
            Ok(None) => {
                warn!("Rejected policy load: null body");
                text(StatusCode::BAD_REQUEST, MISSING_PARAMETERS)
            }
            Err(e) => {
                let err = PolicyError::from(e);
                warn!("Rejected policy load: {}", err);
                text(StatusCode::BAD_REQUEST, err.to_string())
            }
        }
    }

    async fn evaluate<B>(&self, body: B) -> Response<Full<Bytes>>
    where
        B: Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let body = match self.read_body(body).await {
            Ok(body) => body,
            Err(response) => return response,
        };

        let request = match parse_access_request(&body) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected evaluation: {}", e);
                return text(StatusCode::BAD_REQUEST, MISSING_PARAMETERS);
            }
        };

        if self
            .engine
            .can_access(&request.principal, &request.action, &request.resource)
        {
            text(StatusCode::OK, "Access granted")
        } else {
            text(StatusCode::FORBIDDEN, "Access denied")
        }
    }

    async fn read_body<B>(&self, body: B) -> std::result::Result<Bytes, Response<Full<Bytes>>>
    where
        B: Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        match Limited::new(body, self.max_body_bytes).collect().await {
            Ok(collected) => Ok(collected.to_bytes()),
            Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
                warn!(limit = self.max_body_bytes, "Rejected oversized request body");
                Err(text(StatusCode::PAYLOAD_TOO_LARGE, "Payload too large"))
            }
            Err(e) => {
                warn!("Failed to read request body: {}", e);
                Err(text(StatusCode::BAD_REQUEST, "Invalid request body"))
            }
        }
    }
}

/// Parse and validate an evaluation request body
pub fn parse_access_request(body: &[u8]) -> Result<AccessRequest> {
    let request: AccessRequest = serde_json::from_slice(body)?;
    request.validate()?;
    Ok(request)
}

fn text(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

/// Accept connections on `listener` until `shutdown` completes
pub async fn serve<F>(listener: TcpListener, service: PolicyService, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    let local_addr = listener.local_addr()?;
    let http_server = ConnBuilder::new(TokioExecutor::new());

    info!("Policy evaluator listening at http://{}", local_addr);

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((socket, peer)) => {
                        let service = service.clone();
                        let http_server = http_server.clone();
                        tokio::spawn(async move {
                            let svc = service_fn(move |req: Request<Incoming>| {
                                let service = service.clone();
                                async move { service.handle(req).await }
                            });
                            if let Err(e) = http_server.serve_connection(TokioIo::new(socket), svc).await {
                                warn!(%peer, "Connection error: {}", e);
                            }
                        });
                    }
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown requested, no longer accepting connections");
                break;
            }
        }
    }

    Ok(())
}
