use futures::FutureExt;
use protocol::{Envelope, Frame};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn, Instrument};

use crate::actor::{Actor, Context};
use crate::directory::{Address, Directory};
use crate::error::SpawnError;

/// Owns the running actors and the directory they use to reach each other.
pub struct ActorSystem {
    directory: Directory,
    shutdown: watch::Sender<bool>,
    tasks: Vec<(String, JoinHandle<()>)>,
}

impl ActorSystem {
    pub fn new() -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            directory: Directory::new(),
            shutdown,
            tasks: Vec::new(),
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Register `actor` under `name` and start its event loop on its own task.
    pub fn spawn<A: Actor>(&mut self, name: &str, actor: A) -> Result<Address, SpawnError> {
        let (sender, mailbox) = mpsc::unbounded_channel();
        let address = Address::new(name, sender);
        self.directory.register(address.clone())?;

        let ctx = Context::new(name, self.directory.clone());
        let shutdown = self.shutdown.subscribe();
        let span = tracing::info_span!("actor", actor = name);
        let handle = tokio::spawn(run_loop(actor, mailbox, shutdown, ctx).instrument(span));

        self.tasks.push((name.to_string(), handle));
        info!(actor = name, "Actor started");
        Ok(address)
    }

    /// Close every mailbox and wait until each loop has handled what was already queued.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        self.directory.clear();

        for (name, handle) in self.tasks {
            if let Err(e) = handle.await {
                error!(actor = %name, error = %e, "Actor task ended abnormally");
            }
        }
    }
}

impl Default for ActorSystem {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_loop<A: Actor>(
    mut actor: A,
    mut mailbox: mpsc::UnboundedReceiver<Frame>,
    mut shutdown: watch::Receiver<bool>,
    ctx: Context,
) {
    let mut closing = false;
    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed(), if !closing => {
                // no new frames from here on; what is queued still gets handled
                closing = true;
                mailbox.close();
            }
            frame = mailbox.recv() => match frame {
                Some(frame) => dispatch(&mut actor, frame, &ctx).await,
                None => break,
            },
        }
    }
    info!("Actor stopped");
}

async fn dispatch<A: Actor>(actor: &mut A, frame: Frame, ctx: &Context) {
    let envelope = match Envelope::decode(&frame) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "Dropping undecodable frame");
            return;
        }
    };

    let intent = envelope.intent.clone();
    debug!(intent = %intent, session = %envelope.session, "Handling message");

    if let Err(panic) = AssertUnwindSafe(actor.handle(envelope, ctx))
        .catch_unwind()
        .await
    {
        error!(
            intent = %intent,
            panic = panic_message(panic.as_ref()),
            "Handler panicked, continuing with next message"
        );
    }
}

/// Best-effort text of a caught panic payload.
pub fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Probe;
    use crate::SendError;
    use async_trait::async_trait;
    use protocol::Intent;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Forwards every payload to `target`, panicking on "boom".
    struct Relay {
        target: &'static str,
    }

    #[async_trait]
    impl Actor for Relay {
        async fn handle(&mut self, envelope: Envelope, ctx: &Context) {
            if envelope.payload.as_deref() == Some("boom") {
                panic!("boom");
            }
            ctx.send(self.target, &envelope).unwrap();
        }
    }

    /// Counts how many handlers are in flight at once.
    struct Slow {
        in_flight: Arc<AtomicUsize>,
        max_seen: Arc<AtomicUsize>,
        handled: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Actor for Slow {
        async fn handle(&mut self, _envelope: Envelope, _ctx: &Context) {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_seen.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.handled.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn message(text: &str) -> Envelope {
        Envelope::new(Intent::ResponseGet).with_payload(text)
    }

    async fn next_payload(rx: &mut mpsc::UnboundedReceiver<Envelope>) -> String {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out")
            .expect("probe closed")
            .payload
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_fifo_per_sender() {
        let mut system = ActorSystem::new();
        let (probe, mut rx) = Probe::new();
        system.spawn("probe", probe).unwrap();
        let relay = system.spawn("relay", Relay { target: "probe" }).unwrap();

        for i in 0..20 {
            relay.send(&message(&i.to_string())).unwrap();
        }
        for i in 0..20 {
            assert_eq!(next_payload(&mut rx).await, i.to_string());
        }

        system.shutdown().await;
    }

    #[tokio::test]
    async fn test_bad_frames_and_panics_do_not_stop_the_loop() {
        let mut system = ActorSystem::new();
        let (probe, mut rx) = Probe::new();
        system.spawn("probe", probe).unwrap();
        let relay = system.spawn("relay", Relay { target: "probe" }).unwrap();

        relay.send_frame("{not json".to_string()).unwrap();
        relay.send_frame(r#"{"payload":"missing intent"}"#.to_string()).unwrap();
        relay.send(&message("boom")).unwrap();
        relay.send(&message("still alive")).unwrap();

        assert_eq!(next_payload(&mut rx).await, "still alive");
        system.shutdown().await;
    }

    #[tokio::test]
    async fn test_handlers_never_overlap() {
        let mut system = ActorSystem::new();
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));
        let slow = system
            .spawn(
                "slow",
                Slow {
                    in_flight: in_flight.clone(),
                    max_seen: max_seen.clone(),
                    handled: Arc::new(AtomicUsize::new(0)),
                },
            )
            .unwrap();

        for _ in 0..10 {
            slow.send(&message("x")).unwrap();
        }
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
        system.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_drains_queued_messages() {
        let mut system = ActorSystem::new();
        let handled = Arc::new(AtomicUsize::new(0));
        let slow = system
            .spawn(
                "slow",
                Slow {
                    in_flight: Arc::new(AtomicUsize::new(0)),
                    max_seen: Arc::new(AtomicUsize::new(0)),
                    handled: handled.clone(),
                },
            )
            .unwrap();

        for _ in 0..5 {
            slow.send(&message("queued")).unwrap();
        }
        tokio::time::timeout(Duration::from_secs(2), system.shutdown())
            .await
            .expect("shutdown hung");

        assert_eq!(handled.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_directory_errors() {
        let mut system = ActorSystem::new();
        let (probe, _rx) = Probe::new();
        system.spawn("probe", probe).unwrap();

        let (again, _rx2) = Probe::new();
        assert!(matches!(
            system.spawn("probe", again),
            Err(SpawnError::NameTaken(name)) if name == "probe"
        ));
        assert!(matches!(
            system.directory().send("nobody", &message("x")),
            Err(SendError::UnknownActor(name)) if name == "nobody"
        ));
        assert_eq!(system.directory().names(), vec!["probe".to_string()]);

        system.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_closes_mailboxes() {
        let mut system = ActorSystem::new();
        let (probe, _rx) = Probe::new();
        let address = system.spawn("probe", probe).unwrap();

        tokio::time::timeout(Duration::from_secs(2), system.shutdown())
            .await
            .expect("shutdown hung");

        assert!(matches!(
            address.send(&message("late")),
            Err(SendError::MailboxClosed(_))
        ));
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(boxed.as_ref()), "static");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn Any + Send> = Box::new(5u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
