//! Browser playground for jsxify.
//!
//! Serves a paste-and-convert page backed by a WebSocket that converts on
//! every edit, a JSON endpoint for one-off conversions, and an optional
//! directory watcher that re-converts SVG files as they change.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{ConvertRequest, ConvertResponse, Playground, PlaygroundConfig, ServerError};
pub use watcher::{is_svg_path, FileWatcher, WatchEvent};
pub use websocket::{LiveHub, LiveMessage};
