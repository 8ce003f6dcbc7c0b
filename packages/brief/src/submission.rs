// ABOUTME: Contact-form submission flow, independent of brief analysis
// ABOUTME: Lead endpoint is an external collaborator; the shipped implementation only simulates latency

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rockspace_config::DEFAULT_SUBMIT_DELAY_MS;
use rockspace_core::{generate_ticket_id, validate_quote_request, QuoteRequest, Ticket};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::error::{Result, SubmissionError};

/// Endpoint that accepts a lead record
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    async fn submit_lead(&self, lead: QuoteRequest) -> Result<Ticket>;
}

/// Stand-in endpoint: waits a fixed delay and issues a random ticket. Nothing is sent or stored.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS))
    }
}

#[async_trait]
impl LeadSubmitter for SimulatedSubmitter {
    async fn submit_lead(&self, lead: QuoteRequest) -> Result<Ticket> {
        tokio::time::sleep(self.delay).await;

        let ticket = Ticket {
            id: generate_ticket_id(),
            issued_at: Utc::now(),
        };
        info!(
            "Simulated lead submission for {} accepted as ticket {}",
            lead.email, ticket
        );
        Ok(ticket)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Success(Ticket),
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormState::Idle => write!(f, "idle"),
            FormState::Submitting => write!(f, "submitting"),
            FormState::Success(_) => write!(f, "success"),
        }
    }
}

/// Owner of the contact form's [`FormState`].
/// The submission runs on its own task, so dropping the submit future does not strand the form.
pub struct SubmissionController<S> {
    submitter: Arc<S>,
    state: Arc<watch::Sender<FormState>>,
}

/// Returns the form to `idle` if a submission task unwinds before settling
struct IdleGuard {
    state: Arc<watch::Sender<FormState>>,
    armed: bool,
}

impl IdleGuard {
    fn settle(mut self, next: FormState) {
        self.armed = false;
        self.state.send_replace(next);
    }
}

impl Drop for IdleGuard {
    fn drop(&mut self) {
        if self.armed {
            error!("Lead submission ended abnormally, returning form to idle");
            self.state.send_replace(FormState::Idle);
        }
    }
}

impl<S: LeadSubmitter + 'static> SubmissionController<S> {
    pub fn new(submitter: S) -> Self {
        let (state, _) = watch::channel(FormState::Idle);
        Self {
            submitter: Arc::new(submitter),
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Submit a lead. Invalid leads and submissions outside `idle` leave the state untouched.
    /// A rejected lead returns the form to `idle` so it can be sent again.
    pub async fn submit(&self, lead: QuoteRequest) -> Result<Ticket> {
        validate_quote_request(&lead)?;

        let mut refused = None;
        self.state.send_if_modified(|state| match state {
            FormState::Idle => {
                *state = FormState::Submitting;
                true
            }
            FormState::Submitting => {
                refused = Some(SubmissionError::AlreadySubmitting);
                false
            }
            FormState::Success(_) => {
                refused = Some(SubmissionError::AlreadySubmitted);
                false
            }
        });
        if let Some(err) = refused {
            return Err(err);
        }

        let guard = IdleGuard {
            state: self.state.clone(),
            armed: true,
        };
        let submitter = self.submitter.clone();
        let submission = tokio::spawn(async move {
            match submitter.submit_lead(lead).await {
                Ok(ticket) => {
                    guard.settle(FormState::Success(ticket.clone()));
                    Ok(ticket)
                }
                Err(e) => {
                    warn!("Lead submission failed: {}", e);
                    guard.settle(FormState::Idle);
                    Err(e)
                }
            }
        });

        submission.await.unwrap_or_else(|e| {
            error!("Lead submission task failed: {}", e);
            Err(SubmissionError::Rejected(
                "submission did not complete".to_string(),
            ))
        })
    }

    /// Return a completed form to `idle`. Has no effect while submitting.
    pub fn reset(&self) {
        self.state.send_if_modified(|state| {
            if matches!(state, FormState::Success(_)) {
                *state = FormState::Idle;
                true
            } else {
                false
            }
        });
    }
}
