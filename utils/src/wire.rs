use futures::SinkExt;
use futures_util::stream::TryStreamExt;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_serde::formats::Json;
use tokio_util::codec::LengthDelimitedCodec;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("Failed to send a frame: {0}")]
    SendFail(#[source] std::io::Error),

    #[error("Failed to receive a frame: {0}")]
    RecvFail(#[source] std::io::Error),

    #[error("Channel is closed")]
    ChannelClosed,
}

type Frame<Transport, RecvItem, SendItem> = tokio_serde::Framed<
    tokio_util::codec::Framed<Transport, LengthDelimitedCodec>,
    RecvItem,
    SendItem,
    Json<RecvItem, SendItem>,
>;

/// Bidirectional channel exchanging serde messages as length-delimited JSON
/// frames. Every consumer in this workspace speaks a one-command-one-answer
/// protocol, hence the combined `call`.
pub struct JsonChannel<Transport, RecvItem, SendItem>
where
    Transport: AsyncRead + AsyncWrite + Unpin,
    RecvItem: DeserializeOwned + Unpin,
    SendItem: Serialize + Unpin,
{
    frame: Frame<Transport, RecvItem, SendItem>,
}

impl<Transport, RecvItem, SendItem> JsonChannel<Transport, RecvItem, SendItem>
where
    Transport: AsyncRead + AsyncWrite + Unpin,
    RecvItem: DeserializeOwned + Unpin,
    SendItem: Serialize + Unpin,
{
    pub fn new(stream: Transport) -> Self {
        Self {
            frame: tokio_serde::Framed::new(
                tokio_util::codec::Framed::new(stream, LengthDelimitedCodec::new()),
                Json::default(),
            ),
        }
    }

    pub async fn send(&mut self, item: SendItem) -> Result<(), WireError> {
        self.frame.send(item).await.map_err(WireError::SendFail)
    }

    pub async fn recv(&mut self) -> Result<RecvItem, WireError> {
        self.frame
            .try_next()
            .await
            .map_err(WireError::RecvFail)?
            .ok_or(WireError::ChannelClosed)
    }

    pub async fn call(&mut self, request: SendItem) -> Result<RecvItem, WireError> {
        self.send(request).await?;
        self.recv().await
    }
}
