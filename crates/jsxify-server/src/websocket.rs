//! Live conversion over WebSocket.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use jsxify_core::Session;

/// Messages sent to playground clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveMessage {
    /// Connection established
    Connected,

    /// Converted output for the text the client just sent
    Output {
        /// Component source (empty for empty input)
        jsx: String,
    },

    /// User-facing notice; the client clears its output
    Notice {
        /// Message to display
        message: String,
    },

    /// A watched file was re-converted
    FileConverted {
        /// Path of the source file
        path: String,
        /// Component source
        jsx: String,
    },
}

impl LiveMessage {
    /// Feed `text` to the session and describe the outcome.
    pub fn from_input(session: &mut Session, text: &str) -> Self {
        match session.set_input(text) {
            None => LiveMessage::Output {
                jsx: session.output().to_string(),
            },
            Some(notice) => LiveMessage::Notice {
                message: notice.to_string(),
            },
        }
    }
}

/// Hub for broadcasting watcher results to all connected clients.
#[derive(Debug, Clone)]
pub struct LiveHub {
    sender: broadcast::Sender<LiveMessage>,
}

impl LiveHub {
    /// Create a new live hub.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Send a message to all connected clients.
    pub fn send(&self, msg: LiveMessage) {
        // Ignore send errors (no receivers)
        let _ = self.sender.send(msg);
    }

    /// Subscribe to broadcast messages.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveMessage> {
        self.sender.subscribe()
    }
}

impl Default for LiveHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate the client-side script for the playground page.
///
/// Sends the whole input on every edit and renders whatever comes back.
/// File uploads are read in the browser and sent the same way.
pub fn live_client_script(ws_path: &str) -> String {
    format!(
        r#"
(function() {{
  'use strict';

  const input = document.getElementById('svg-input');
  const output = document.getElementById('jsx-output');
  const upload = document.getElementById('svg-upload');
  const copy = document.getElementById('copy-jsx');
  const notice = document.getElementById('notice');
  const files = document.getElementById('watched-files');

  const scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  const ws = new WebSocket(scheme + location.host + '{ws_path}');

  function showNotice(message) {{
    notice.textContent = message;
    notice.hidden = false;
    clearTimeout(showNotice.timer);
    showNotice.timer = setTimeout(function() {{ notice.hidden = true; }}, 3000);
  }}

  function send(text) {{
    if (ws.readyState === WebSocket.OPEN) {{
      ws.send(text);
    }}
  }}

  ws.onmessage = function(event) {{
    const msg = JSON.parse(event.data);

    switch (msg.type) {{
      case 'output':
        output.value = msg.jsx;
        copy.disabled = !msg.jsx;
        break;

      case 'notice':
        output.value = '';
        copy.disabled = true;
        showNotice(msg.message);
        break;

      case 'file_converted':
        const item = document.createElement('details');
        const summary = document.createElement('summary');
        const pre = document.createElement('pre');
        summary.textContent = msg.path;
        pre.textContent = msg.jsx;
        item.append(summary, pre);
        files.prepend(item);
        break;

      case 'connected':
        console.log('[jsxify] Connected');
        break;
    }}
  }};

  ws.onclose = function() {{
    showNotice('Disconnected from jsxify');
  }};

  input.addEventListener('input', function() {{
    send(input.value);
  }});

  upload.addEventListener('change', function() {{
    const file = upload.files[0];
    if (!file) return;

    if (!file.name.endsWith('.svg')) {{
      showNotice('Please upload an SVG file');
      return;
    }}

    const reader = new FileReader();
    reader.onload = function() {{
      input.value = reader.result;
      send(reader.result);
    }};
    reader.onerror = function() {{
      output.value = '';
      showNotice('Failed to read file');
    }};
    reader.readAsText(file);
  }});

  copy.addEventListener('click', function() {{
    if (!output.value) {{
      showNotice('No JSX to copy');
      return;
    }}
    navigator.clipboard.writeText(output.value).then(function() {{
      showNotice('JSX copied to clipboard');
    }});
  }});
}})();
"#
    )
}
