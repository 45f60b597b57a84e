//! 基于 tokio 通道的宿主适配器
//!
//! 请求经无界队列发出，每个请求附带一个 oneshot，由接收端回复结果

use crate::kernel::services::ports::{resolved, Host, HostError, HostFuture, HostRequest};
use tokio::sync::mpsc;
use tokio::sync::oneshot;

#[derive(Debug)]
pub struct HostEnvelope {
    pub request: HostRequest,
    reply: oneshot::Sender<Result<(), HostError>>,
}

impl HostEnvelope {
    pub fn reply(self, result: Result<(), HostError>) {
        let _ = self.reply.send(result);
    }
}

#[derive(Clone)]
pub struct ChannelHost {
    tx: mpsc::UnboundedSender<HostEnvelope>,
}

pub struct HostReceiver {
    rx: mpsc::UnboundedReceiver<HostEnvelope>,
}

pub fn host_channel() -> (ChannelHost, HostReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelHost { tx }, HostReceiver { rx })
}

impl Host for ChannelHost {
    fn execute(&self, request: HostRequest) -> HostFuture {
        let command = request.command();
        let (reply, reply_rx) = oneshot::channel();
        if self.tx.send(HostEnvelope { request, reply }).is_err() {
            tracing::warn!(command, "host channel closed, request dropped");
            return resolved(Err(HostError::Disconnected));
        }
        tracing::debug!(command, "request forwarded to host");
        Box::pin(async move { reply_rx.await.unwrap_or(Err(HostError::Disconnected)) })
    }
}

impl HostReceiver {
    pub async fn recv(&mut self) -> Option<HostEnvelope> {
        self.rx.recv().await
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/host.rs"]
mod tests;
