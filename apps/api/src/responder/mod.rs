//! Responder: drafts the customer reply, a short summary and management
//! actions for a submission.
//!
//! Each draft first goes to the remote generator. Any failure is logged and
//! replaced with the tier's fallback template, so drafting never fails.

pub mod fallback;
pub mod prompts;

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::llm_client::{LlmError, TextGenerator};
use crate::models::{Rating, RatingTier};

/// Why a draft came from a template instead of the remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    MissingCredential,
    Timeout,
    Transport,
    Api,
    Malformed,
    EmptyContent,
}

impl From<&LlmError> for FallbackReason {
    fn from(e: &LlmError) -> Self {
        match e {
            LlmError::MissingCredential => FallbackReason::MissingCredential,
            LlmError::Timeout => FallbackReason::Timeout,
            LlmError::Http(_) => FallbackReason::Transport,
            LlmError::Api { .. } => FallbackReason::Api,
            LlmError::Malformed(_) => FallbackReason::Malformed,
            LlmError::EmptyContent => FallbackReason::EmptyContent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum DraftSource {
    Remote,
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub text: String,
    pub source: DraftSource,
}

/// The three drafts produced for one submission.
#[derive(Debug, Clone)]
pub struct Drafts {
    pub reply: Draft,
    pub summary: Draft,
    pub actions: Draft,
}

#[derive(Debug, Clone, Copy)]
enum DraftKind {
    Reply,
    Summary,
    Actions,
}

impl DraftKind {
    fn label(self) -> &'static str {
        match self {
            DraftKind::Reply => "reply",
            DraftKind::Summary => "summary",
            DraftKind::Actions => "actions",
        }
    }

    fn template(self) -> &'static str {
        match self {
            DraftKind::Reply => prompts::REPLY_PROMPT_TEMPLATE,
            DraftKind::Summary => prompts::SUMMARY_PROMPT_TEMPLATE,
            DraftKind::Actions => prompts::ACTIONS_PROMPT_TEMPLATE,
        }
    }

    fn fallback(self, rating: Rating, tier: RatingTier, review: &str) -> String {
        match self {
            DraftKind::Reply => fallback::reply(rating, tier),
            DraftKind::Summary => fallback::summary(review),
            DraftKind::Actions => fallback::actions(tier),
        }
    }
}

#[derive(Clone)]
pub struct Responder {
    generator: Arc<dyn TextGenerator>,
}

impl Responder {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn draft_reply(&self, rating: Rating, review: &str) -> Draft {
        self.draft(DraftKind::Reply, rating, review).await
    }

    pub async fn draft_summary(&self, rating: Rating, review: &str) -> Draft {
        self.draft(DraftKind::Summary, rating, review).await
    }

    pub async fn draft_actions(&self, rating: Rating, review: &str) -> Draft {
        self.draft(DraftKind::Actions, rating, review).await
    }

    /// Drafts reply, summary and actions concurrently.
    pub async fn draft_all(&self, rating: Rating, review: &str) -> Drafts {
        let (reply, summary, actions) = tokio::join!(
            self.draft_reply(rating, review),
            self.draft_summary(rating, review),
            self.draft_actions(rating, review),
        );
        Drafts {
            reply,
            summary,
            actions,
        }
    }

    async fn draft(&self, kind: DraftKind, rating: Rating, review: &str) -> Draft {
        let prompt = prompts::render(kind.template(), rating, review);

        match self.generator.generate(&prompt).await {
            Ok(text) => Draft {
                text,
                source: DraftSource::Remote,
            },
            Err(e) => {
                let reason = FallbackReason::from(&e);
                if reason == FallbackReason::MissingCredential {
                    info!("Drafting {} from template: {e}", kind.label());
                } else {
                    warn!("Remote {} draft failed, using template: {e}", kind.label());
                }
                Draft {
                    text: kind.fallback(rating, rating.tier(), review),
                    source: DraftSource::Fallback(reason),
                }
            }
        }
    }
}
