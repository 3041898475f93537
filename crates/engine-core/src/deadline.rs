use std::{future::Future, time::Duration};
use thiserror::Error;
use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;

/// Why a bounded operation stopped before finishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Interrupt {
    #[error("Overall time budget of {budget:?} exceeded")]
    TimedOut { budget: Duration },

    #[error("Operation cancelled")]
    Cancelled,
}

/// Wall-clock budget shared by every step of one operation, combined with a
/// cancellation token. Both waits and in-flight work are cut short by it.
#[derive(Debug, Clone)]
pub struct Deadline {
    budget: Option<Duration>,
    at: Option<Instant>,
    cancel: CancellationToken,
}

impl Deadline {
    /// Budget starts counting now. A budget too large to place on the clock
    /// never expires.
    pub fn after(budget: Duration, cancel: CancellationToken) -> Self {
        Deadline {
            budget: Some(budget),
            at: Instant::now().checked_add(budget),
            cancel,
        }
    }

    /// No time limit; only cancellation applies.
    pub fn unbounded(cancel: CancellationToken) -> Self {
        Deadline {
            budget: None,
            at: None,
            cancel,
        }
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn timed_out(&self) -> Interrupt {
        Interrupt::TimedOut {
            budget: self.budget.unwrap_or_default(),
        }
    }

    /// Fails up front, without waiting, when the delay would end past the
    /// deadline.
    pub async fn sleep(&self, delay: Duration) -> Result<(), Interrupt> {
        if self.is_cancelled() {
            return Err(Interrupt::Cancelled);
        }
        if let Some(remaining) = self.remaining()
            && delay > remaining
        {
            return Err(self.timed_out());
        }

        tokio::select! {
            _ = self.cancel.cancelled() => Err(Interrupt::Cancelled),
            _ = sleep(delay) => Ok(()),
        }
    }

    /// Drives `fut` until it completes, the deadline passes or the token is
    /// cancelled, whichever comes first.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Interrupt>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return Err(Interrupt::Cancelled);
        }

        let expiry = async {
            match self.at {
                Some(at) => sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Interrupt::Cancelled),
            _ = expiry => Err(self.timed_out()),
            output = fut => Ok(output),
        }
    }
}
