//! Receiving side of the downstream sockets
//!
//! Accepts connections from the stream/execution publishers and logs each
//! '\r'-framed dump as it arrives. The original system ran these as
//! separate viewer processes; here they are optional tasks in the same
//! process.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Run a '\r'-framed receiver until the task is dropped.
pub async fn run_receiver(addr: String, label: &'static str) {
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(receiver = label, %addr, %err, "receiver bind failed, aborted");
            return;
        }
    };
    info!(receiver = label, %addr, "receiver listening");

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(receiver = label, %err, "accept failed");
                continue;
            }
        };
        info!(receiver = label, %peer, "publisher connected");

        let mut reader = BufReader::new(stream);
        let mut frame = Vec::new();
        loop {
            frame.clear();
            match reader.read_until(b'\r', &mut frame).await {
                Ok(0) => break,
                Ok(_) => {
                    if frame.last() == Some(&b'\r') {
                        frame.pop();
                    }
                    let text = String::from_utf8_lossy(&frame);
                    let text = text.trim();
                    if !text.is_empty() {
                        info!(receiver = label, "{text}");
                    }
                }
                Err(err) => {
                    warn!(receiver = label, %err, "read failed, closing connection");
                    break;
                }
            }
        }
        info!(receiver = label, %peer, "publisher disconnected");
    }
}
