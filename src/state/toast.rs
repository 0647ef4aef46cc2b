use std::rc::Rc;

use yew::{Callback, Reducible};

pub const DEFAULT_TOAST_MS: u32 = 3000;
/// Length of the slide-out transition before a toast is removed.
pub const TOAST_EXIT_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
            ToastKind::Warning => "toast-warning",
            ToastKind::Info => "toast-info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✕",
            ToastKind::Warning => "!",
            ToastKind::Info => "i",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
    pub duration_ms: u32,
}

#[derive(Debug, Clone)]
pub enum ToastAction {
    Push { kind: ToastKind, message: String },
    Dismiss(u32),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastQueue {
    next_id: u32,
    pub toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn apply(&mut self, action: ToastAction) {
        match action {
            ToastAction::Push { kind, message } => {
                self.next_id += 1;
                self.toasts.push(Toast {
                    id: self.next_id,
                    kind,
                    message,
                    duration_ms: DEFAULT_TOAST_MS,
                });
            }
            ToastAction::Dismiss(id) => self.toasts.retain(|t| t.id != id),
        }
    }
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}

/// Handed to pages through context so any of them can raise a toast.
#[derive(Clone, PartialEq)]
pub struct Toaster {
    dispatch: Callback<ToastAction>,
}

impl Toaster {
    pub fn new(dispatch: Callback<ToastAction>) -> Self {
        Self { dispatch }
    }

    pub fn show(&self, kind: ToastKind, message: impl Into<String>) {
        self.dispatch.emit(ToastAction::Push { kind, message: message.into() });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }

    pub fn dismiss(&self, id: u32) {
        self.dispatch.emit(ToastAction::Dismiss(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn push_assigns_increasing_ids() {
        let mut queue = ToastQueue::default();
        queue.apply(ToastAction::Push { kind: ToastKind::Success, message: "saved".into() });
        queue.apply(ToastAction::Push { kind: ToastKind::Error, message: "failed".into() });

        let ids: Vec<u32> = queue.toasts.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(queue.toasts.iter().all(|t| t.duration_ms == DEFAULT_TOAST_MS));
    }

    #[test]
    fn dismiss_removes_only_that_toast() {
        let mut queue = ToastQueue::default();
        for message in ["a", "b", "c"] {
            queue.apply(ToastAction::Push { kind: ToastKind::Info, message: message.into() });
        }
        queue.apply(ToastAction::Dismiss(2));
        queue.apply(ToastAction::Dismiss(42));

        let left: Vec<&str> = queue.toasts.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(left, vec!["a", "c"]);
    }

    #[test]
    fn dismissed_ids_are_not_reused() {
        let queue = Rc::new(ToastQueue::default());
        let queue = queue.reduce(ToastAction::Push { kind: ToastKind::Info, message: "one".into() });
        let queue = queue.reduce(ToastAction::Dismiss(1));
        let queue = queue.reduce(ToastAction::Push { kind: ToastKind::Info, message: "two".into() });
        assert_eq!(queue.toasts[0].id, 2);
    }

    #[test]
    fn toaster_dispatches_push_actions() {
        let seen = Rc::new(RefCell::new(ToastQueue::default()));
        let sink = seen.clone();
        let toaster = Toaster::new(Callback::from(move |action: ToastAction| sink.borrow_mut().apply(action)));

        toaster.success("Model created successfully");
        toaster.error("Failed to fetch models");
        toaster.dismiss(1);

        let queue = seen.borrow();
        assert_eq!(queue.toasts.len(), 1);
        assert_eq!(queue.toasts[0].kind, ToastKind::Error);
    }
}
