//! Tests for [`gembot::HandlerChain`] ordering and short-circuit behavior.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gembot::core::{Handler, HandlerResponse, Message, OutgoingReply, Result};
use gembot::HandlerChain;

mod common;
use common::test_message;

/// Probe handler that records its phase invocations into a shared log.
struct ProbeHandler {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
    before_result: bool,
    handle_result: HandlerResponse,
}

impl ProbeHandler {
    fn new(
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
        before_result: bool,
        handle_result: HandlerResponse,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            log,
            before_result,
            handle_result,
        })
    }

    fn record(&self, phase: &str) {
        self.log.lock().unwrap().push(format!("{}:{}", self.name, phase));
    }
}

#[async_trait]
impl Handler for ProbeHandler {
    async fn before(&self, _message: &Message) -> Result<bool> {
        self.record("before");
        Ok(self.before_result)
    }

    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        self.record("handle");
        Ok(self.handle_result.clone())
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        self.record("after");
        Ok(())
    }
}

#[tokio::test]
async fn test_phases_run_in_order_with_after_reversed() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(ProbeHandler::new("a", log.clone(), true, HandlerResponse::Continue))
        .add_handler(ProbeHandler::new("b", log.clone(), true, HandlerResponse::Continue));

    let response = chain.handle(&test_message(1, "hello")).await.unwrap();
    assert_eq!(response, HandlerResponse::Continue);

    let entries = log.lock().unwrap().clone();
    assert_eq!(
        entries,
        vec![
            "a:before", "b:before", "a:handle", "b:handle", "b:after", "a:after"
        ]
    );
}

#[tokio::test]
async fn test_before_false_stops_chain() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(ProbeHandler::new("a", log.clone(), false, HandlerResponse::Continue))
        .add_handler(ProbeHandler::new("b", log.clone(), true, HandlerResponse::Continue));

    let response = chain.handle(&test_message(1, "hello")).await.unwrap();
    assert_eq!(response, HandlerResponse::Stop);

    let entries = log.lock().unwrap().clone();
    assert_eq!(entries, vec!["a:before"]);
}

#[tokio::test]
async fn test_reply_ends_handle_phase_but_after_still_runs() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let reply = HandlerResponse::Reply(OutgoingReply::plain("answer"));
    let chain = HandlerChain::new()
        .add_handler(ProbeHandler::new("a", log.clone(), true, reply.clone()))
        .add_handler(ProbeHandler::new("b", log.clone(), true, HandlerResponse::Continue));

    let response = chain.handle(&test_message(1, "hello")).await.unwrap();
    assert_eq!(response, reply);

    let entries = log.lock().unwrap().clone();
    // b's handle is skipped, but both afters run in reverse.
    assert_eq!(
        entries,
        vec!["a:before", "b:before", "a:handle", "b:after", "a:after"]
    );
}

#[tokio::test]
async fn test_empty_chain_continues() {
    let chain = HandlerChain::new();
    let response = chain.handle(&test_message(1, "hello")).await.unwrap();
    assert_eq!(response, HandlerResponse::Continue);
}
