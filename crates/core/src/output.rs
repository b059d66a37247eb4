// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output stream relay: fan-in of native engine channels into one transcript.

use crate::channel::ScriptChannel;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputMessage {
    pub channel: ScriptChannel,
    pub text: String,
    /// Position within this message's channel (0-based).
    pub seq: u64,
}

type ChangeCallback = Box<dyn Fn(&OutputMessage) + Send + Sync>;

/// Multiplexes the five native output channels, plus internally generated
/// diagnostics, into a uniform transcript with change notification.
///
/// Ordering is preserved within a channel and independent across channels.
/// Reads are non-destructive and repeatable; the transcript is retained for
/// as long as the run result referencing it.
#[derive(Default)]
pub struct OutputRelay {
    inner: Mutex<RelayInner>,
    callbacks: Mutex<Vec<ChangeCallback>>,
}

#[derive(Default)]
struct RelayInner {
    transcript: Vec<OutputMessage>,
    next_seq: [u64; 5],
}

impl OutputRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message directly, bypassing the native channels. Used for
    /// cancellation and fault diagnostics.
    pub fn add_output(&self, channel: ScriptChannel, text: impl Into<String>) {
        let message = {
            let mut inner = self.inner.lock();
            let seq = inner.next_seq[channel.index()];
            inner.next_seq[channel.index()] += 1;
            let message = OutputMessage {
                channel,
                text: text.into(),
                seq,
            };
            inner.transcript.push(message.clone());
            message
        };
        for callback in self.callbacks.lock().iter() {
            callback(&message);
        }
    }

    /// Forward every item a native channel produces into the transcript,
    /// tagged with `channel`, as it is produced rather than buffered until
    /// completion. The forwarding task ends when the session side of the
    /// stream is dropped.
    pub fn subscribe_stream(
        self: &Arc<Self>,
        mut stream: mpsc::UnboundedReceiver<String>,
        channel: ScriptChannel,
    ) -> JoinHandle<()> {
        let relay = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(text) = stream.recv().await {
                relay.add_output(channel, text);
            }
        })
    }

    /// Register a change callback, fired once per appended message.
    pub fn on_change(&self, callback: impl Fn(&OutputMessage) + Send + Sync + 'static) {
        self.callbacks.lock().push(Box::new(callback));
    }

    /// Snapshot of the full transcript.
    pub fn messages(&self) -> Vec<OutputMessage> {
        self.inner.lock().transcript.clone()
    }

    /// Snapshot of one channel's messages, in channel order.
    pub fn messages_for(&self, channel: ScriptChannel) -> Vec<OutputMessage> {
        self.inner
            .lock()
            .transcript
            .iter()
            .filter(|m| m.channel == channel)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().transcript.is_empty()
    }
}

impl fmt::Debug for OutputRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputRelay")
            .field("messages", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
