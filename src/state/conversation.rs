//! Client-side conversation state: the message log, the in-flight flag and the
//! scroll/height bookkeeping the chat view renders from.
//!
//! The controller is the only writer of the log. Every mutation hands the
//! listener a full [`ConversationSnapshot`], never a diff.

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::ChatMessage;
use crate::services::chat::{ChatSender, SendRequest};

pub const SEND_ERROR_MESSAGE: &str =
    "Sorry, there was an error processing your message. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Sending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Instant,
    Smooth,
}

/// Bumped on every append or explicit scroll so the view can react once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollRequest {
    pub seq: u64,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversationSnapshot {
    pub messages: Rc<Vec<ChatMessage>>,
    pub phase: Phase,
    pub scroll: ScrollRequest,
    /// Last content height measured while idle, in pixels.
    pub pinned_height: Option<i32>,
}

impl ConversationSnapshot {
    pub fn is_sending(&self) -> bool {
        self.phase == Phase::Sending
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank text or a send already in flight; nothing changed.
    Rejected,
    Replied,
    /// Both backend paths failed; the fixed error reply was appended.
    Failed,
}

#[derive(Default)]
struct State {
    messages: Vec<ChatMessage>,
    phase: Phase,
    scroll: ScrollRequest,
    pinned_height: Option<i32>,
}

impl State {
    fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
        let behavior = if self.messages.len() <= 1 {
            ScrollBehavior::Instant
        } else {
            ScrollBehavior::Smooth
        };
        self.request_scroll(behavior);
    }

    fn request_scroll(&mut self, behavior: ScrollBehavior) {
        self.scroll = ScrollRequest { seq: self.scroll.seq + 1, behavior };
    }

    fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            messages: Rc::new(self.messages.clone()),
            phase: self.phase,
            scroll: self.scroll,
            pinned_height: self.pinned_height,
        }
    }
}

pub type Listener = Rc<dyn Fn(ConversationSnapshot)>;

#[derive(Clone)]
pub struct ConversationController {
    state: Rc<RefCell<State>>,
    sender: Rc<dyn ChatSender>,
    listener: Listener,
}

impl PartialEq for ConversationController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl ConversationController {
    pub fn new(sender: Rc<dyn ChatSender>, listener: Listener) -> Self {
        Self {
            state: Rc::new(RefCell::new(State::default())),
            sender,
            listener,
        }
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        self.state.borrow().snapshot()
    }

    pub fn is_sending(&self) -> bool {
        self.state.borrow().phase == Phase::Sending
    }

    pub fn len(&self) -> usize {
        self.state.borrow().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends the user message right away, then waits for the assistant reply.
    /// A failed send never reaches the caller: it becomes an error reply in the log.
    pub async fn send(&self, request: SendRequest) -> SendOutcome {
        if !self.begin(&request.text) {
            return SendOutcome::Rejected;
        }

        match self.sender.send_message(&request).await {
            Ok(reply) => {
                self.finish(reply);
                SendOutcome::Replied
            }
            Err(err) => {
                tracing::error!(model_id = %request.model_id, error = %err, "chat send failed");
                self.finish(ChatMessage::assistant(SEND_ERROR_MESSAGE));
                SendOutcome::Failed
            }
        }
    }

    fn begin(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        {
            let mut state = self.state.borrow_mut();
            if state.phase == Phase::Sending {
                tracing::debug!("send ignored, reply still pending");
                return false;
            }
            state.phase = Phase::Sending;
            state.append(ChatMessage::user(text));
        }
        self.notify();
        true
    }

    fn finish(&self, reply: ChatMessage) {
        {
            let mut state = self.state.borrow_mut();
            state.phase = Phase::Idle;
            state.append(reply);
        }
        self.notify();
    }

    pub fn clear(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.messages.clear();
            state.pinned_height = None;
        }
        self.notify();
    }

    pub fn scroll_to_bottom(&self) {
        self.state.borrow_mut().request_scroll(ScrollBehavior::Smooth);
        self.notify();
    }

    /// Pins the layout height. Measurements taken while a reply is pending are ignored.
    pub fn record_content_height(&self, height: i32) {
        {
            let mut state = self.state.borrow_mut();
            if state.phase == Phase::Sending || state.pinned_height == Some(height) {
                return;
            }
            state.pinned_height = Some(height);
        }
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        (self.listener)(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::Role;
    use async_trait::async_trait;
    use std::cell::Cell;

    struct FakeSender {
        calls: Cell<usize>,
        reply: Result<&'static str, ()>,
    }

    #[async_trait(?Send)]
    impl ChatSender for FakeSender {
        async fn send_message(&self, _request: &SendRequest) -> Result<ChatMessage, ApiError> {
            self.calls.set(self.calls.get() + 1);
            tokio::task::yield_now().await;
            match self.reply {
                Ok(text) => Ok(ChatMessage::assistant(text)),
                Err(()) => Err(ApiError::Network("offline".into())),
            }
        }
    }

    struct Harness {
        controller: ConversationController,
        sender: Rc<FakeSender>,
        seen: Rc<RefCell<Vec<ConversationSnapshot>>>,
    }

    fn harness(reply: Result<&'static str, ()>) -> Harness {
        let sender = Rc::new(FakeSender { calls: Cell::new(0), reply });
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let controller = ConversationController::new(
            sender.clone(),
            Rc::new(move |snapshot: ConversationSnapshot| sink.borrow_mut().push(snapshot)),
        );
        Harness { controller, sender, seen }
    }

    fn hello(text: &str) -> SendRequest {
        SendRequest::new(text, "m1", Vec::<String>::new())
    }

    #[tokio::test]
    async fn blank_text_is_rejected_without_calls() {
        let h = harness(Ok("unused"));

        assert_eq!(h.controller.send(hello("")).await, SendOutcome::Rejected);
        assert_eq!(h.controller.send(hello("  \n\t ")).await, SendOutcome::Rejected);

        assert!(h.controller.is_empty());
        assert_eq!(h.sender.calls.get(), 0);
        assert!(h.seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn success_appends_user_then_assistant() {
        let h = harness(Ok("Hi! How can I help?"));

        let outcome = h.controller.send(hello("  Hello ")).await;
        assert_eq!(outcome, SendOutcome::Replied);

        let seen = h.seen.borrow();
        assert_eq!(seen.len(), 2);

        let optimistic = &seen[0];
        assert!(optimistic.is_sending());
        assert_eq!(optimistic.messages.len(), 1);
        assert_eq!(optimistic.messages[0].role, Role::User);
        assert_eq!(optimistic.messages[0].content, "Hello");

        let done = &seen[1];
        assert!(!done.is_sending());
        let roles: Vec<Role> = done.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
        assert_eq!(done.messages[1].content, "Hi! How can I help?");
        assert_ne!(done.messages[0].id, done.messages[1].id);
    }

    #[tokio::test]
    async fn failure_appends_fixed_error_and_returns_to_idle() {
        let h = harness(Err(()));

        assert_eq!(h.controller.send(hello("Hello")).await, SendOutcome::Failed);

        let snapshot = h.controller.snapshot();
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[1].role, Role::Assistant);
        assert_eq!(snapshot.messages[1].content, SEND_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn concurrent_send_is_ignored() {
        let h = harness(Ok("reply"));
        let second = h.controller.clone();

        let (first, rejected) = tokio::join!(h.controller.send(hello("one")), async move {
            second.send(hello("two")).await
        });

        assert_eq!(first, SendOutcome::Replied);
        assert_eq!(rejected, SendOutcome::Rejected);
        assert_eq!(h.sender.calls.get(), 1);
        let contents: Vec<String> =
            h.controller.snapshot().messages.iter().map(|m| m.content.clone()).collect();
        assert_eq!(contents, vec!["one".to_string(), "reply".to_string()]);
    }

    #[tokio::test]
    async fn first_append_scrolls_instantly_then_smoothly() {
        let h = harness(Ok("reply"));

        h.controller.send(hello("first")).await;

        let seen = h.seen.borrow();
        assert_eq!(seen[0].scroll.behavior, ScrollBehavior::Instant);
        assert_eq!(seen[1].scroll.behavior, ScrollBehavior::Smooth);
        assert!(seen[1].scroll.seq > seen[0].scroll.seq);
    }

    #[tokio::test]
    async fn height_is_pinned_only_while_idle() {
        let h = harness(Ok("reply"));
        h.controller.record_content_height(320);
        assert_eq!(h.controller.snapshot().pinned_height, Some(320));

        assert!(h.controller.begin("hold"));
        h.controller.record_content_height(40);
        assert_eq!(h.controller.snapshot().pinned_height, Some(320));

        h.controller.finish(ChatMessage::assistant("done"));
        h.controller.record_content_height(480);
        assert_eq!(h.controller.snapshot().pinned_height, Some(480));
    }

    #[tokio::test]
    async fn clear_empties_log_and_notifies() {
        let h = harness(Ok("reply"));
        h.controller.send(hello("Hello")).await;

        h.controller.clear();

        assert!(h.controller.is_empty());
        let seen = h.seen.borrow();
        assert!(seen.last().unwrap().messages.is_empty());
    }

    #[test]
    fn scroll_to_bottom_issues_smooth_request() {
        let h = harness(Ok("reply"));
        let before = h.controller.snapshot().scroll.seq;

        h.controller.scroll_to_bottom();

        let scroll = h.controller.snapshot().scroll;
        assert_eq!(scroll.seq, before + 1);
        assert_eq!(scroll.behavior, ScrollBehavior::Smooth);
        assert_eq!(h.seen.borrow().len(), 1);
    }
}
