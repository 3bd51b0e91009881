//! Concurrent Dispatch
//!
//! This example shares one connection state machine between worker threads
//! that dispatch events and monitor threads that only read.
//!
//! Key concepts:
//! - `Arc<StateMachine>` shared across threads
//! - Dispatches serialized by the write lock
//! - Readers observe whole states only
//! - A custom transition hook counting commits
//!
//! Run with: RUST_LOG=fsmcell=debug cargo run --example concurrent_dispatch

use fsmcell::core::{State, Transitions};
use fsmcell::machine::StateMachine;
use fsmcell::state_enum;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
struct Disconnected;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
struct Connected {
    session: u32,
    messages: u64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
struct Closed;

state_enum! {
    enum Connection {
        Disconnected,
        Connected,
        Closed,
    }
    final: [Closed]
}

struct Connect(u32);
struct Message;
struct Close;

#[derive(Debug, Error)]
enum ConnectionError {
    #[error("cannot send a message while {0}")]
    NotConnected(String),
}

#[derive(Default)]
struct Link {
    commits: AtomicUsize,
}

impl Link {
    fn observe(&self, current: &Connection, next: &Connection) {
        self.commits.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(from = current.name(), to = next.name(), "link state changed");
    }
}

impl Transitions<Connection, Connect> for Link {
    type Error = ConnectionError;

    fn on_event(
        &self,
        state: &Connection,
        event: Connect,
    ) -> Result<Option<Connection>, Self::Error> {
        Ok(match state {
            Connection::Disconnected(_) => Some(
                Connected {
                    session: event.0,
                    messages: 0,
                }
                .into(),
            ),
            _ => None,
        })
    }

    fn on_transition(&self, current: &Connection, next: &Connection) {
        self.observe(current, next);
    }
}

impl Transitions<Connection, Message> for Link {
    type Error = ConnectionError;

    fn on_event(&self, state: &Connection, _: Message) -> Result<Option<Connection>, Self::Error> {
        match state {
            Connection::Connected(c) => Ok(Some(
                Connected {
                    session: c.session,
                    messages: c.messages + 1,
                }
                .into(),
            )),
            other => Err(ConnectionError::NotConnected(other.name().to_string())),
        }
    }

    fn on_transition(&self, current: &Connection, next: &Connection) {
        self.observe(current, next);
    }
}

impl Transitions<Connection, Close> for Link {
    type Error = ConnectionError;

    fn on_event(&self, state: &Connection, _: Close) -> Result<Option<Connection>, Self::Error> {
        Ok(match state {
            Connection::Closed(_) => None,
            _ => Some(Closed.into()),
        })
    }

    fn on_transition(&self, current: &Connection, next: &Connection) {
        self.observe(current, next);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Concurrent Dispatch Example ===\n");

    let link = Arc::new(StateMachine::new(Link::default(), Connection::Disconnected(Disconnected)));

    if let Err(err) = link.dispatch(Message) {
        println!("Rejected before connecting: {err}");
    }

    let workers: Vec<_> = (0..4)
        .map(|id| {
            let link = Arc::clone(&link);
            thread::spawn(move || {
                // Only the first connect wins; the rest are declined.
                let _ = link.dispatch(Connect(id));
                for _ in 0..250 {
                    link.dispatch(Message).unwrap();
                }
            })
        })
        .collect();

    let monitor = {
        let link = Arc::clone(&link);
        thread::spawn(move || {
            let mut samples = 0;
            while !link.hold::<Closed>() && samples < 1_000 {
                if let Some(connected) = link.get::<Connected>() {
                    assert!(connected.messages <= 1_000);
                }
                samples += 1;
            }
            samples
        })
    };

    for worker in workers {
        worker.join().unwrap();
    }

    let connected = link.get::<Connected>().unwrap();
    println!("Session {} carried {} messages", connected.session, connected.messages);

    link.dispatch(Close).unwrap();
    println!("Monitor took {} samples", monitor.join().unwrap());
    println!("Closed: {}, final: {}", link.hold::<Closed>(), link.is_final());
    println!("Committed transitions: {}", link.policy().commits.load(Ordering::Relaxed));

    println!("\n=== Example Complete ===");
}
