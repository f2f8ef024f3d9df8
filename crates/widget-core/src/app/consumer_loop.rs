//! ConsumerLoop - drains the inbox one request at a time
//!
//! # Flow
//! 1. RequestSource::fetch() (the item is gone from the inbox afterwards)
//! 2. schema check; invalid requests are logged and dropped
//! 3. Dispatcher::route() to the storage strategy
//! 4. empty inbox or a recoverable inbox error: wait one poll interval
//!
//! Strictly sequential: the next fetch starts only after the previous request
//! is fully handled. There is no shutdown path; the loop runs until the process
//! is killed or the inbox is lost.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::MissedTickBehavior;

use super::dispatch::{DispatchOutcome, Dispatcher};
use super::status::CycleStats;
use crate::domain::{ConsumerError, WidgetRequest, schema};
use crate::ports::RequestSource;

/// What one cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Inbox was empty.
    Idle,
    /// A create or delete was applied.
    Processed,
    /// The request failed validation (or was not JSON) and was dropped.
    Rejected,
    /// Valid request of a type without a handler.
    Ignored,
    /// The backend rejected the write or delete.
    Failed,
    /// The inbox could not be read this cycle.
    SourceError,
}

impl CycleOutcome {
    /// Whether the loop should wait before the next fetch.
    pub fn should_idle(&self) -> bool {
        matches!(self, CycleOutcome::Idle | CycleOutcome::SourceError)
    }
}

pub struct ConsumerLoop {
    source: Arc<dyn RequestSource>,
    dispatcher: Dispatcher,
    poll_interval: Duration,
    max_source_failures: u32,
    consecutive_source_failures: u32,
    stats: CycleStats,
}

impl ConsumerLoop {
    /// `poll_interval` must be non-zero; `ConsumerBuilder` checks this.
    pub fn new(
        source: Arc<dyn RequestSource>,
        dispatcher: Dispatcher,
        poll_interval: Duration,
        max_source_failures: u32,
    ) -> Self {
        Self {
            source,
            dispatcher,
            poll_interval,
            max_source_failures,
            consecutive_source_failures: 0,
            stats: CycleStats::default(),
        }
    }

    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    pub fn backend(&self) -> &'static str {
        self.dispatcher.backend()
    }

    /// Run until a fatal inbox error. Never returns `Ok` on its own.
    pub async fn run(&mut self) -> Result<(), ConsumerError> {
        tracing::info!(
            backend = self.backend(),
            poll_interval = ?self.poll_interval,
            "consumer started"
        );

        let mut idle_timer = tokio::time::interval(self.poll_interval);
        idle_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut drained = true;

        loop {
            let outcome = self.run_once().await?;
            if outcome.should_idle() {
                if !drained {
                    tracing::debug!(
                        fetched = self.stats.fetched(),
                        stats = ?self.stats,
                        "inbox drained"
                    );
                    drained = true;
                }
                idle_timer.reset();
                idle_timer.tick().await;
            } else {
                drained = false;
            }
        }
    }

    /// One fetch -> validate -> dispatch cycle.
    ///
    /// Errors only when the inbox is gone for good; everything else is
    /// reported through the returned outcome.
    pub async fn run_once(&mut self) -> Result<CycleOutcome, ConsumerError> {
        let outcome = match self.source.fetch().await {
            Ok(None) => {
                self.consecutive_source_failures = 0;
                CycleOutcome::Idle
            }
            Ok(Some(value)) => {
                self.consecutive_source_failures = 0;
                self.process(value).await
            }
            Err(e) if e.is_fatal() => {
                tracing::error!(error = %e, "request inbox unavailable");
                return Err(ConsumerError::SourceUnavailable(e));
            }
            Err(e) if e.dropped_item() => {
                self.consecutive_source_failures = 0;
                tracing::warn!(error = %e, "skipping unreadable widget request");
                CycleOutcome::Rejected
            }
            Err(e) if e.is_list_failure() => {
                self.consecutive_source_failures += 1;
                let failures = self.consecutive_source_failures;
                if self.max_source_failures > 0 && failures >= self.max_source_failures {
                    tracing::error!(error = %e, failures, "giving up on request inbox");
                    return Err(ConsumerError::SourceExhausted { failures, last: e });
                }
                tracing::warn!(error = %e, failures, "failed to list request inbox");
                CycleOutcome::SourceError
            }
            // the item stays in the inbox and is retried next cycle
            Err(e) => {
                tracing::warn!(error = %e, "failed to read widget request");
                CycleOutcome::SourceError
            }
        };

        self.stats.record(outcome);
        Ok(outcome)
    }

    async fn process(&self, value: Value) -> CycleOutcome {
        if let Err(violation) = schema::check(&value) {
            tracing::warn!(%violation, "skipping invalid widget request");
            return CycleOutcome::Rejected;
        }

        let request = match WidgetRequest::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "skipping undecodable widget request");
                return CycleOutcome::Rejected;
            }
        };

        match self.dispatcher.route(&request).await {
            DispatchOutcome::Written | DispatchOutcome::Deleted => CycleOutcome::Processed,
            DispatchOutcome::Ignored(kind) => {
                tracing::debug!(
                    request_id = %request.request_id,
                    kind = %kind,
                    "ignoring request type without a handler"
                );
                CycleOutcome::Ignored
            }
            DispatchOutcome::Failed(e) => {
                tracing::warn!(
                    request_id = %request.request_id,
                    widget_id = %request.widget_id,
                    error = %e,
                    kind = ?e.kind(),
                    "widget request failed"
                );
                CycleOutcome::Failed
            }
        }
    }
}
