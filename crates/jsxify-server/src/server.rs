//! Playground server implementation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use jsxify_core::{
    component_name_from_stem, is_valid_identifier, read_source, ConvertError, ConvertOptions,
    Notice, Pipeline, Session,
};

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{live_client_script, LiveHub, LiveMessage};

const LIVE_PATH: &str = "/__live";

/// Configuration for the playground server.
#[derive(Debug, Clone)]
pub struct PlaygroundConfig {
    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Directory of SVG files to re-convert on change
    pub watch_dir: Option<PathBuf>,

    /// Conversion options for every request
    pub options: ConvertOptions,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
            watch_dir: None,
            options: ConvertOptions::default(),
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}:{1}")]
    InvalidAddress(String, u16),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared server state.
struct ServerState {
    options: ConvertOptions,
    pipeline: Pipeline,
    hub: LiveHub,
}

type SharedState = Arc<ServerState>;

/// Request body for `POST /api/convert`.
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    /// SVG markup
    pub source: String,

    /// Overrides the configured component name
    #[serde(default)]
    pub component_name: Option<String>,
}

/// Response body for `POST /api/convert`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ConvertResponse {
    Ok { output: String },
    Err { error: String },
}

/// API errors, all reported as `422 Unprocessable Entity`.
enum ApiError {
    Convert(ConvertError),
    InvalidComponentName(String),
}

impl From<ConvertError> for ApiError {
    fn from(err: ConvertError) -> Self {
        ApiError::Convert(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = match self {
            ApiError::Convert(err) => Notice::from(&err).to_string(),
            ApiError::InvalidComponentName(name) => {
                format!("Invalid component name {name:?}: must be a JavaScript identifier")
            }
        };

        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ConvertResponse::Err { error }),
        )
            .into_response()
    }
}

/// Browser playground for converting SVG markup.
pub struct Playground {
    config: PlaygroundConfig,
}

impl Playground {
    /// Create a new playground server.
    pub fn new(config: PlaygroundConfig) -> Self {
        Self { config }
    }

    /// Start the server and run until it is shut down.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| ServerError::InvalidAddress(self.config.host.clone(), self.config.port))?;

        let state = Arc::new(ServerState {
            options: self.config.options.clone(),
            pipeline: Pipeline::new(&self.config.options),
            hub: LiveHub::new(),
        });

        if let Some(dir) = &self.config.watch_dir {
            let (watcher, mut rx) = FileWatcher::new(&[dir.clone()])
                .map_err(|e| ServerError::WatchError(e.to_string()))?;
            tracing::info!("Watching {} for SVG changes", dir.display());

            let state_clone = Arc::clone(&state);
            tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    dispatch_watch_event(Arc::clone(&state_clone), event).await;
                }
                // Keep watcher alive
                drop(watcher);
            });
        }

        let app = router(state);

        tracing::info!("Starting playground at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

fn router(state: SharedState) -> Router {
    let api = Router::new()
        .route("/api/convert", post(convert_handler))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(index_handler))
        .route(LIVE_PATH, get(ws_handler))
        .route("/__live.js", get(live_script_handler))
        .merge(api)
        .with_state(state)
}

/// Run [`handle_watch_event`] on the blocking pool; it reads from disk.
async fn dispatch_watch_event(state: SharedState, event: WatchEvent) {
    tracing::debug!("Watch event for {}", event.path().display());

    let task = tokio::task::spawn_blocking(move || handle_watch_event(&state, event));
    if let Err(e) = task.await {
        tracing::error!("Watch task failed: {}", e);
    }
}

/// Re-convert a watched file and broadcast the result.
fn handle_watch_event(state: &ServerState, event: WatchEvent) {
    let path = match event {
        WatchEvent::Changed(path) => path,
        WatchEvent::Removed(path) => {
            tracing::info!("SVG removed: {}", path.display());
            return;
        }
    };

    match convert_file(&state.options, &path) {
        Ok(jsx) => {
            tracing::info!("Converted {}", path.display());
            state.hub.send(LiveMessage::FileConverted {
                path: path.display().to_string(),
                jsx,
            });
        }
        Err(e) => tracing::warn!("Failed to convert {}: {}", path.display(), e),
    }
}

/// Convert one file, naming the component after the file stem.
fn convert_file(options: &ConvertOptions, path: &Path) -> Result<String, ConvertError> {
    let source = read_source(path)?;
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let options = ConvertOptions {
        component_name: component_name_from_stem(stem),
        ..options.clone()
    };

    Pipeline::new(&options)
        .convert(&source)
        .map(|output| output.into_string())
}

/// Handler for the playground page.
async fn index_handler() -> impl IntoResponse {
    Html(PLAYGROUND_HTML)
}

/// Handler for `POST /api/convert`.
async fn convert_handler(
    State(state): State<SharedState>,
    Json(request): Json<ConvertRequest>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let output = match request.component_name {
        Some(name) if !is_valid_identifier(&name) => {
            return Err(ApiError::InvalidComponentName(name));
        }
        Some(name) => Pipeline::new(&ConvertOptions {
            component_name: name,
            ..state.options.clone()
        })
        .convert(&request.source),
        None => state.pipeline.convert(&request.source),
    }?;

    Ok(Json(ConvertResponse::Ok {
        output: output.into_string(),
    }))
}

/// Handler for the live WebSocket endpoint.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
///
/// Each connection owns a session. Every text frame is a complete input and
/// the reply is its conversion. Watcher broadcasts are interleaved with
/// replies.
async fn handle_ws(mut socket: WebSocket, state: SharedState) {
    let mut rx = state.hub.subscribe();
    let mut session = Session::new(&state.options);

    if send_message(&mut socket, &LiveMessage::Connected).await.is_err() {
        return;
    }

    loop {
        let reply = tokio::select! {
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    LiveMessage::from_input(&mut session, text.as_str())
                }
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => continue,
            },
            broadcast = rx.recv() => match broadcast {
                Ok(msg) => msg,
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    tracing::debug!("Live client lagged by {} messages", n);
                    continue;
                }
                Err(_) => break,
            },
        };

        if send_message(&mut socket, &reply).await.is_err() {
            break;
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &LiveMessage) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(msg) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize live message: {}", e);
            return Ok(());
        }
    };
    socket.send(Message::Text(json.into())).await
}

/// Handler for the live client script.
async fn live_script_handler() -> impl IntoResponse {
    let script = live_client_script(LIVE_PATH);
    ([("content-type", "application/javascript")], script)
}

const PLAYGROUND_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>jsxify</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 1100px; margin: 2rem auto; padding: 0 1rem; }
    .panes { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
    .bar { display: flex; justify-content: space-between; align-items: center; }
    textarea { width: 100%; height: 500px; font-family: ui-monospace, monospace; box-sizing: border-box; }
    #notice { position: fixed; bottom: 1rem; right: 1rem; background: #222; color: #fff; padding: 0.5rem 1rem; border-radius: 0.5rem; }
    pre { background: #f5f5f5; padding: 1rem; border-radius: 0.5rem; overflow-x: auto; }
  </style>
</head>
<body>
  <h1>SVG to JSX</h1>
  <div class="panes">
    <section>
      <div class="bar">
        <h2>SVG Input</h2>
        <input type="file" accept=".svg" id="svg-upload">
      </div>
      <textarea id="svg-input" placeholder="Paste your SVG here..."></textarea>
    </section>
    <section>
      <div class="bar">
        <h2>JSX Output</h2>
        <button id="copy-jsx" disabled>Copy JSX</button>
      </div>
      <textarea id="jsx-output" readonly placeholder="JSX will appear here..."></textarea>
    </section>
  </div>
  <section id="watched-files"></section>
  <div id="notice" hidden></div>
  <script src="/__live.js"></script>
</body>
</html>"#;
