// Router Dashboard - Event Subscriptions
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Cancellable subscriptions to the router's server-sent event streams.
//!
//! A reader task on the network runtime decodes the stream and forwards typed
//! items over an unbounded channel. The GTK side awaits [`EventSubscription::next`]
//! and tears the subscription down through a [`SubscriptionHandle`].

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::{Stream, StreamExt};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use super::client::ApiClient;
use super::sse::SseDecoder;

/// Converts the data of one event into a typed item.
pub type Decoder<T> = fn(&str) -> serde_json::Result<T>;

/// Receiving end of a live event stream.
pub struct EventSubscription<T> {
    receiver: mpsc::UnboundedReceiver<T>,
    handle: SubscriptionHandle,
}

/// Cloneable control for closing a subscription from elsewhere.
#[derive(Clone)]
pub struct SubscriptionHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    name: String,
    closed: AtomicBool,
    abort: AbortHandle,
}

impl SubscriptionHandle {
    /// Stop the reader task. Safe to call any number of times.
    pub fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::SeqCst) {
            self.inner.abort.abort();
            info!("Closed event stream {}", self.inner.name);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("name", &self.inner.name)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl<T: Send + 'static> EventSubscription<T> {
    /// Subscribe to an SSE endpoint.
    ///
    /// With `reconnect` set the stream is reopened after that delay whenever
    /// the transport ends; otherwise the subscription ends with it.
    pub fn open(
        runtime: &Handle,
        client: ApiClient,
        path: &'static str,
        decode: Decoder<T>,
        reconnect: Option<Duration>,
    ) -> Self {
        Self::spawn(runtime, path, move |sender| {
            read_endpoint(client, path, decode, reconnect, sender)
        })
    }

    /// Spawn a reader producing into a fresh channel.
    pub(crate) fn spawn<F, Fut>(runtime: &Handle, name: &str, reader: F) -> Self
    where
        F: FnOnce(mpsc::UnboundedSender<T>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        let task = runtime.spawn(reader(sender));

        Self {
            receiver,
            handle: SubscriptionHandle {
                inner: Arc::new(HandleInner {
                    name: name.to_string(),
                    closed: AtomicBool::new(false),
                    abort: task.abort_handle(),
                }),
            },
        }
    }

    /// Next item in arrival order, `None` once the stream ended or was closed.
    pub async fn next(&mut self) -> Option<T> {
        if self.handle.is_closed() {
            return None;
        }
        let item = self.receiver.recv().await?;
        if self.handle.is_closed() {
            return None;
        }
        Some(item)
    }

    pub fn handle(&self) -> SubscriptionHandle {
        self.handle.clone()
    }

    pub fn close(&mut self) {
        self.handle.close();
        self.receiver.close();
    }
}

impl<T> Drop for EventSubscription<T> {
    fn drop(&mut self) {
        self.handle.close();
    }
}

async fn read_endpoint<T: Send + 'static>(
    client: ApiClient,
    path: &'static str,
    decode: Decoder<T>,
    reconnect: Option<Duration>,
    sender: mpsc::UnboundedSender<T>,
) {
    loop {
        match client.open_stream(path).await {
            Ok(response) => {
                info!("Event stream {} opened", path);
                match forward_events(response.bytes_stream(), decode, &sender).await {
                    Ok(()) => info!("Event stream {} ended", path),
                    Err(e) => warn!("Event stream {} failed: {:#}", path, e),
                }
            }
            Err(e) => warn!("{:#}", e),
        }

        if sender.is_closed() {
            break;
        }
        match reconnect {
            Some(delay) => {
                debug!("Reopening event stream {} in {:?}", path, delay);
                tokio::time::sleep(delay).await;
            }
            None => break,
        }
    }
}

/// Decode an SSE byte stream and forward the items until it ends or the
/// receiver is gone. Events that fail to decode are skipped.
pub(crate) async fn forward_events<S, B, E, T>(
    stream: S,
    decode: Decoder<T>,
    sender: &mpsc::UnboundedSender<T>,
) -> Result<()>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
{
    futures_util::pin_mut!(stream);
    let mut decoder = SseDecoder::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Failed to read event stream")?;
        for message in decoder.feed(chunk.as_ref()) {
            if !deliver(&message.data, decode, sender) {
                return Ok(());
            }
        }
    }

    if let Some(message) = decoder.finish() {
        deliver(&message.data, decode, sender);
    }
    Ok(())
}

fn deliver<T>(data: &str, decode: Decoder<T>, sender: &mpsc::UnboundedSender<T>) -> bool {
    match decode(data) {
        Ok(item) => sender.send(item).is_ok(),
        Err(e) => {
            warn!("Skipping malformed event: {}", e);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CpuSample, LogEvent};
    use futures_util::stream;

    fn chunks(parts: &[&str]) -> Vec<std::result::Result<Vec<u8>, std::io::Error>> {
        parts.iter().map(|p| Ok(p.as_bytes().to_vec())).collect()
    }

    #[tokio::test]
    async fn test_forward_events_reassembles_and_skips_malformed() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let body = chunks(&[
            "data: {\"rid\": \"a\", \"act",
            "ion\": \"block\"}\n\ndata: not json\n\n",
            ": keep-alive\n\ndata: {\"rid\": \"b\"}\n\n",
        ]);

        forward_events(stream::iter(body), LogEvent::from_json, &sender)
            .await
            .unwrap();
        drop(sender);

        let mut rids = Vec::new();
        while let Some(event) = receiver.recv().await {
            rids.push(event.rid);
        }
        assert_eq!(rids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_forward_events_reports_transport_error() {
        let (sender, _receiver) = mpsc::unbounded_channel::<CpuSample>();
        let body: Vec<std::result::Result<Vec<u8>, std::io::Error>> = vec![
            Ok(b"data: {\"total\": 1}\n\n".to_vec()),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ];

        let result = forward_events(stream::iter(body), CpuSample::from_json, &sender).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_forward_events_stops_when_receiver_dropped() {
        let (sender, receiver) = mpsc::unbounded_channel::<CpuSample>();
        drop(receiver);
        let body = chunks(&["data: {\"total\": 1}\n\ndata: {\"total\": 2}\n\n"]);

        let result = forward_events(stream::iter(body), CpuSample::from_json, &sender).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_subscription_delivers_in_order_then_ends() {
        let body = chunks(&["data: {\"total\": 10}\n\n", "data: {\"total\": 20}\n\n"]);
        let mut subscription = EventSubscription::spawn(&Handle::current(), "test", |sender| async move {
            let _ = forward_events(stream::iter(body), CpuSample::from_json, &sender).await;
        });

        assert_eq!(subscription.next().await.map(|s| s.total), Some(10.0));
        assert_eq!(subscription.next().await.map(|s| s.total), Some(20.0));
        assert!(subscription.next().await.is_none());
    }

    #[tokio::test]
    async fn test_close_stops_delivery_and_is_idempotent() {
        let mut subscription = EventSubscription::spawn(&Handle::current(), "test", |sender| async move {
            for i in 0..3 {
                let _ = sender.send(i);
            }
            std::future::pending::<()>().await;
        });

        assert_eq!(subscription.next().await, Some(0));
        let handle = subscription.handle();
        handle.close();
        handle.close();
        assert!(handle.is_closed());
        // Items still buffered in the channel are not delivered after close.
        assert_eq!(subscription.next().await, None);
        subscription.close();
        assert_eq!(subscription.next().await, None);
    }
}
