//! TCP control server
//!
//! Connections never touch application state. Each parsed command is sent
//! over a channel to the application's loop together with a reply slot, and
//! the connection waits for the reply before reading the next line.

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};

use crate::protocol::{DebugCommand, DebugResponse};

/// Commands waiting for the application loop
const QUEUE_DEPTH: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind control server on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// A command plus the slot its response goes back through.
#[derive(Debug)]
pub struct CommandEnvelope {
    pub command: DebugCommand,
    pub reply: oneshot::Sender<DebugResponse>,
}

impl CommandEnvelope {
    /// Send `response` back to the waiting connection. A client that has
    /// already gone away is not an error.
    pub fn respond(self, response: DebugResponse) {
        if self.reply.send(response).is_err() {
            log::debug!("Control client went away before its reply");
        }
    }
}

/// Server handle - keep this alive to keep the server running
pub struct DebugServer {
    local_addr: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl DebugServer {
    /// Bind to `127.0.0.1:port` and start accepting clients. Commands arrive
    /// on the returned receiver. Returns immediately -- server runs in
    /// background.
    pub async fn start(port: u16) -> Result<(Self, mpsc::Receiver<CommandEnvelope>), ServerError> {
        let addr = format!("127.0.0.1:{}", port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr: addr.clone(), source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;
        log::info!("Control server listening on {}", local_addr);

        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        let handle = tokio::spawn(accept_loop(listener, tx));
        Ok((Self { local_addr, handle }, rx))
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl Drop for DebugServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn accept_loop(listener: TcpListener, commands: mpsc::Sender<CommandEnvelope>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                log::info!("Control client connected from {}", peer);
                let commands = commands.clone();
                tokio::spawn(async move {
                    handle_connection(stream, commands).await;
                    log::info!("Control client disconnected: {}", peer);
                });
            }
            Err(e) => {
                log::error!("Control server accept error: {}", e);
            }
        }
    }
}

async fn dispatch(commands: &mpsc::Sender<CommandEnvelope>, command: DebugCommand) -> DebugResponse {
    let (reply, response) = oneshot::channel();
    if commands.send(CommandEnvelope { command, reply }).await.is_err() {
        return DebugResponse::error("Garden loop is not running");
    }
    response
        .await
        .unwrap_or_else(|_| DebugResponse::error("Garden loop dropped the command"))
}

async fn handle_connection(stream: tokio::net::TcpStream, commands: mpsc::Sender<CommandEnvelope>) {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => break, // Connection closed
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let response = match serde_json::from_str::<DebugCommand>(trimmed) {
                    Ok(cmd) => {
                        log::debug!("Control command: {:?}", cmd);
                        dispatch(&commands, cmd).await
                    }
                    Err(e) => {
                        log::warn!("Rejected control command: {}", e);
                        DebugResponse::error(format!("Invalid command JSON: {}", e))
                    }
                };

                let mut resp_json = serde_json::to_string(&response).unwrap_or_else(|e| {
                    format!("{{\"status\":\"error\",\"message\":\"Serialize error: {}\"}}", e)
                });
                resp_json.push('\n');

                if let Err(e) = writer.write_all(resp_json.as_bytes()).await {
                    log::error!("Control server write error: {}", e);
                    break;
                }
                if let Err(e) = writer.flush().await {
                    log::error!("Control server flush error: {}", e);
                    break;
                }
            }
            Err(e) => {
                log::error!("Control server read error: {}", e);
                break;
            }
        }
    }
}
