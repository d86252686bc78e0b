//! Handler chain result types.

/// The (question, response) pair attached to a reply that should offer
/// like/dislike buttons. Registered with the pending-feedback tracker
/// once the transport message id is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackOffer {
    pub question: String,
    pub response: String,
}

/// Reply body produced by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingReply {
    pub text: String,
    pub feedback: Option<FeedbackOffer>,
}

impl OutgoingReply {
    /// A reply without feedback buttons (greetings, cached answers, errors).
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            feedback: None,
        }
    }

    /// A fresh AI reply, eligible for like/dislike feedback.
    pub fn with_feedback(
        text: impl Into<String>,
        question: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            feedback: Some(FeedbackOffer {
                question: question.into(),
                response: response.into(),
            }),
        }
    }
}

/// Handler result for the chain. `Reply` carries the response body; the
/// runner decides how to render it (plain or with buttons).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Stop the chain and attach the reply.
    Reply(OutgoingReply),
}
