//! Background content loading, last request wins.
//!
//! Each request resolves on its own thread and reports back over a
//! channel with the ticket it was issued. Only the newest ticket is ever
//! delivered; older results are dropped when they arrive. Superseded reads
//! are not cancelled.

use crate::catalog::Catalog;
use crate::resolve::{Document, ResolveError, Resolver};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::debug;

/// A finished resolution.
#[derive(Debug)]
pub struct Loaded {
    pub ticket: u64,
    pub id: String,
    pub result: Result<Document, ResolveError>,
}

pub struct Loader {
    catalog: Arc<Catalog>,
    resolver: Arc<Resolver>,
    tx: Sender<Loaded>,
    rx: Receiver<Loaded>,
    latest: u64,
    delivered: u64,
}

impl Loader {
    pub fn new(catalog: Arc<Catalog>, resolver: Resolver) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            catalog,
            resolver: Arc::new(resolver),
            tx,
            rx,
            latest: 0,
            delivered: 0,
        }
    }

    /// Start resolving `id`, superseding any request still in flight.
    pub fn request(&mut self, id: &str) -> u64 {
        self.latest += 1;
        let ticket = self.latest;
        let id = id.to_string();
        let catalog = Arc::clone(&self.catalog);
        let resolver = Arc::clone(&self.resolver);
        let tx = self.tx.clone();

        debug!(ticket, %id, "requesting content");
        thread::spawn(move || {
            let result = resolver.resolve(&catalog, &id);
            // The receiver only goes away when the app is shutting down
            let _ = tx.send(Loaded { ticket, id, result });
        });

        ticket
    }

    /// True while the newest request has not been delivered.
    pub fn is_pending(&self) -> bool {
        self.delivered < self.latest
    }

    /// Drain finished work and return the newest request's result, if it
    /// has arrived.
    pub fn poll(&mut self) -> Option<Loaded> {
        let mut current = None;
        loop {
            match self.rx.try_recv() {
                Ok(loaded) if loaded.ticket == self.latest => {
                    self.delivered = loaded.ticket;
                    current = Some(loaded);
                }
                Ok(stale) => {
                    debug!(
                        ticket = stale.ticket,
                        latest = self.latest,
                        id = %stale.id,
                        "discarding superseded content"
                    );
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        current
    }
}
