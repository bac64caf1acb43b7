//! A search box's view of resolution: last submission wins.
//!
//! Every [`submit`](SearchSession::submit) takes a ticket. When a resolution
//! finishes it is published only if no newer submission (or clear) happened
//! in the meantime. Older in-flight model calls are not cancelled; their
//! results are just dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::engine::apply_filter;
use crate::resolver::{Resolution, Resolver};
use crate::types::company::CompanyRecord;

pub struct SearchSession {
    resolver: Resolver,
    companies: Arc<Vec<CompanyRecord>>,
    latest_ticket: AtomicU64,
    current: watch::Sender<Arc<Resolution>>,
}

impl SearchSession {
    pub fn new(resolver: Resolver, companies: Arc<Vec<CompanyRecord>>) -> Self {
        let (current, _) = watch::channel(Arc::new(Resolution::empty()));
        Self {
            resolver,
            companies,
            latest_ticket: AtomicU64::new(0),
            current,
        }
    }

    pub fn companies(&self) -> &[CompanyRecord] {
        &self.companies
    }

    /// Resolve `query` and publish the result unless it went stale.
    ///
    /// Returns `None` when a later submission or [`clear`](Self::clear)
    /// superseded this one while it was resolving.
    pub async fn submit(&self, query: &str) -> Option<Arc<Resolution>> {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;

        let resolution = Arc::new(self.resolver.resolve(query, &self.companies).await);

        let published = self.current.send_if_modified(|current| {
            if self.latest_ticket.load(Ordering::SeqCst) != ticket {
                return false;
            }
            *current = resolution.clone();
            true
        });

        if published {
            Some(resolution)
        } else {
            debug!(ticket, query, "Discarding stale resolution");
            None
        }
    }

    /// Drop the current filter and any outstanding submission.
    pub fn clear(&self) {
        self.latest_ticket.fetch_add(1, Ordering::SeqCst);
        self.current.send_replace(Arc::new(Resolution::empty()));
    }

    /// The most recently published resolution.
    pub fn current(&self) -> Arc<Resolution> {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Resolution>> {
        self.current.subscribe()
    }

    /// Records visible under the current resolution.
    pub fn visible(&self) -> Vec<CompanyRecord> {
        apply_filter(&self.current().filter, &self.companies)
    }
}
