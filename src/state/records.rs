use std::rc::Rc;

use yew::Reducible;

use crate::models::{Model, Plugin};

/// Records addressed by their server identifier.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Model {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Plugin {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Swaps in the server's copy of an edited record, keeping list order.
pub fn replace_by_id<T: Identified>(records: &mut [T], updated: T) -> bool {
    match records.iter_mut().find(|r| r.id() == updated.id()) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

pub fn remove_by_id<T: Identified>(records: &mut Vec<T>, id: &str) -> bool {
    let before = records.len();
    records.retain(|r| r.id() != id);
    records.len() != before
}

/// A server-backed list edited in place as requests complete.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordList<T> {
    pub items: Vec<T>,
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

#[derive(Debug, Clone)]
pub enum RecordAction<T> {
    Loaded(Vec<T>),
    Added(T),
    Replaced(T),
    Removed(String),
}

impl<T: Identified + Clone> RecordList<T> {
    pub fn apply(&mut self, action: RecordAction<T>) {
        match action {
            RecordAction::Loaded(items) => self.items = items,
            RecordAction::Added(item) => self.items.push(item),
            RecordAction::Replaced(item) => {
                if !replace_by_id(&mut self.items, item) {
                    tracing::debug!("updated record no longer listed");
                }
            }
            RecordAction::Removed(id) => {
                remove_by_id(&mut self.items, &id);
            }
        }
    }
}

impl<T: Identified + Clone + 'static> Reducible for RecordList<T> {
    type Action = RecordAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelStatus;

    fn model(id: &str, name: &str) -> Model {
        Model {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            api_endpoint: String::new(),
            status: ModelStatus::Active,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn replace_keeps_position() {
        let mut models = vec![model("a", "A"), model("b", "B"), model("c", "C")];
        assert!(replace_by_id(&mut models, model("b", "B2")));
        let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B2", "C"]);
        assert!(!replace_by_id(&mut models, model("z", "Z")));
    }

    #[test]
    fn remove_reports_whether_anything_changed() {
        let mut models = vec![model("a", "A"), model("b", "B")];
        assert!(remove_by_id(&mut models, "a"));
        assert!(!remove_by_id(&mut models, "a"));
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "b");
    }

    #[test]
    fn list_follows_request_results() {
        let mut list = RecordList::default();

        list.apply(RecordAction::Loaded(vec![model("a", "A"), model("b", "B")]));
        list.apply(RecordAction::Added(model("c", "C")));
        list.apply(RecordAction::Replaced(model("a", "A2")));
        list.apply(RecordAction::Removed("b".into()));
        list.apply(RecordAction::Replaced(model("gone", "X")));

        let names: Vec<&str> = list.items.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["A2", "C"]);
    }
}
