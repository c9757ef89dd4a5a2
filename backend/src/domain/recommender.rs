//! Turns a recommendation context into event details.
//!
//! The completion source is best effort: transport failures and unusable
//! replies are logged and replaced by the fallback event so trip flows never
//! fail because the model misbehaved.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{CompletionRequest, CompletionSource};
use crate::domain::{ParsedReply, Recommendation, RecommendationContext, parse_reply, render_prompt};

/// Recommendation engine over a completion source.
pub struct Recommender<C: ?Sized> {
    source: Arc<C>,
}

impl<C: ?Sized> Clone for Recommender<C> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<C> Recommender<C>
where
    C: CompletionSource + ?Sized,
{
    /// Create a recommender backed by `source`.
    pub fn new(source: Arc<C>) -> Self {
        Self { source }
    }

    /// Produce the next activity for `context`.
    ///
    /// Never fails. The returned [`Recommendation::source`] records whether
    /// the model reply was used.
    pub async fn recommend(&self, context: &RecommendationContext) -> Recommendation {
        let request = CompletionRequest {
            prompt: render_prompt(context),
        };
        let reply = match self.source.complete(&request).await {
            Ok(reply) => reply,
            Err(error) => {
                warn!(%error, "completion failed; using fallback event");
                return Recommendation::fallback(&context.current_location);
            }
        };

        match parse_reply(&reply) {
            ParsedReply::Complete(details) => {
                debug!(name = %details.name, "model recommendation accepted");
                Recommendation::from_model(details)
            }
            ParsedReply::Incomplete { missing } => {
                warn!(?missing, "completion reply missing fields; using fallback event");
                Recommendation::fallback(&context.current_location)
            }
            ParsedReply::Unparseable => {
                warn!(
                    reply_len = reply.len(),
                    "completion reply not recognised; using fallback event"
                );
                Recommendation::fallback(&context.current_location)
            }
        }
    }
}
