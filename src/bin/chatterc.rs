//! chatterc - minimal interactive terminal client for chatterd.
//!
//! Connects, sends `/nick <name>` as its first line, then forwards
//! stdin lines to the server while a background task prints everything
//! the server sends. Stops after sending `/quit` or at end of input.

use anyhow::Context as _;
use futures_util::{SinkExt, StreamExt};
use tokio::io::AsyncBufReadExt;
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec};

const MAX_LINE_LENGTH: usize = 512;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let (addr, name) = match (args.next(), args.next()) {
        (Some(addr), Some(name)) => (addr, name),
        _ => {
            eprintln!("usage: chatterc <server-address> <user-name>");
            std::process::exit(1);
        }
    };

    let stream = TcpStream::connect(&addr)
        .await
        .with_context(|| format!("unable to connect to {addr}"))?;
    println!("Connection established.");

    let framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
    let (mut writer, mut reader) = framed.split();

    writer.send(format!("/nick {name}")).await?;

    let receiver = tokio::spawn(async move {
        while let Some(Ok(line)) = reader.next().await {
            println!("{line}");
        }
    });

    let mut stdin = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = stdin.next_line().await? {
        writer.send(line.clone()).await?;
        if line.split_whitespace().next() == Some("/quit") {
            break;
        }
    }

    receiver.abort();
    println!("Connection to the server closed.");
    Ok(())
}
