//! File-to-socket feeder
//!
//! Replays a fixture file into a feed socket, one newline-terminated line
//! at a time. The generated fixture files carry a header line which is
//! skipped before streaming.

use std::io;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{error, info};

/// Stream a file's data lines to `addr`; returns the number of lines sent.
pub async fn stream_file(
    path: impl AsRef<Path>,
    addr: &str,
    skip_header: bool,
) -> io::Result<usize> {
    let path = path.as_ref();
    let file = match File::open(path).await {
        Ok(file) => file,
        Err(err) => {
            error!(path = %path.display(), %err, "no such file or directory");
            return Err(err);
        }
    };
    let mut stream = TcpStream::connect(addr).await?;
    info!(path = %path.display(), %addr, "feeding");

    let mut lines = BufReader::new(file).lines();
    let mut sent = 0usize;
    let mut first = true;
    while let Some(line) = lines.next_line().await? {
        if first {
            first = false;
            if skip_header {
                continue;
            }
        }
        if line.trim().is_empty() {
            continue;
        }
        stream.write_all(line.as_bytes()).await?;
        stream.write_all(b"\n").await?;
        sent += 1;
    }
    stream.flush().await?;
    info!(path = %path.display(), sent, "feed complete");
    Ok(sent)
}
