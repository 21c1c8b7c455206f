//! Test chat client.
//!
//! A line-oriented TCP client with timeouts, for asserting on the
//! server's message flow.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::{timeout, timeout_at};

/// A test chat client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    /// Connect to a test server.
    pub async fn connect(addr: SocketAddr) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: write_half,
        })
    }

    /// Send one line.
    pub async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single line.
    pub async fn recv_line(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a line with a timeout. Errors on timeout and on a closed
    /// connection.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed");
        }
        Ok(line.trim_end().to_string())
    }

    /// Receive lines until one contains `needle`, discarding the rest.
    pub async fn expect_containing(&mut self, needle: &str) -> anyhow::Result<String> {
        for _ in 0..32 {
            let line = self.recv_line().await?;
            if line.contains(needle) {
                return Ok(line);
            }
        }
        anyhow::bail!("no line containing {needle:?} within 32 messages")
    }

    /// Assert that nothing arrives within `dur`.
    #[allow(dead_code)]
    pub async fn expect_silence(&mut self, dur: Duration) -> anyhow::Result<()> {
        match self.recv_timeout(dur).await {
            Ok(line) => anyhow::bail!("unexpected line: {line}"),
            Err(_) => Ok(()),
        }
    }

    /// Whether the server has closed this connection. Drains any lines
    /// still buffered on the stream while waiting for EOF.
    #[allow(dead_code)]
    pub async fn is_closed(&mut self, dur: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + dur;
        loop {
            let mut line = String::new();
            match timeout_at(deadline, self.reader.read_line(&mut line)).await {
                Ok(Ok(0)) => return true,
                Ok(Ok(_)) => continue,
                Ok(Err(_)) | Err(_) => return false,
            }
        }
    }
}
