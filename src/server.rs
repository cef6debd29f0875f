// Proxy Server
//
// Axum hosting adapter around the core handler in `proxy.rs`. The route
// handler only translates shapes: axum extractors in, `ProxyResponse` out.
// Other hosting environments would add their own equally thin adapter and
// call the same `proxy::handle`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;

use crate::config::Config;
use crate::extractor::ExtractorClient;
use crate::proxy::{self, ProxyContext, ProxyRequest};

pub struct ProxyServer {
    config: Config,
}

impl ProxyServer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn start(self) -> anyhow::Result<()> {
        // One shared client for both outbound legs. Redirects happen upstream
        // of the caller, so follow a bounded number of them here.
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        let resolver = Arc::new(ExtractorClient::new(
            self.config.extractor_url.clone(),
            http.clone(),
        ));
        let ctx = Arc::new(ProxyContext::new(resolver, http));

        let addr = SocketAddr::new(self.config.bind_addr, self.config.port);
        log::info!("Media relay listening on http://{}", addr);
        log::info!("Extraction endpoint: {}", self.config.extractor_url);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router(ctx)).await?;

        Ok(())
    }
}

/// Build the application router. Split out so tests can serve it on an
/// ephemeral port with stub collaborators.
pub fn router(ctx: Arc<ProxyContext>) -> Router {
    Router::new().route("/proxy", any(proxy_entry)).with_state(ctx)
}

async fn proxy_entry(
    State(ctx): State<Arc<ProxyContext>>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Response {
    let request = ProxyRequest { method, query };
    let response = proxy::handle(request, &ctx).await;
    (response.status, response.headers, response.body).into_response()
}
