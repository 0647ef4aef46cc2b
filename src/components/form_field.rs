use yew::prelude::*;

use crate::error::FormErrors;
use crate::forms::Draft;
use crate::utils::event_value;

/// Writes the control's value into `field` and drops that field's error.
pub fn bind_field<D, E>(
    draft: &UseStateHandle<D>,
    errors: &UseStateHandle<FormErrors>,
    field: &'static str,
) -> Callback<E>
where
    D: Draft + 'static,
    E: TargetCast + 'static,
{
    let draft = draft.clone();
    let errors = errors.clone();
    Callback::from(move |e: E| {
        let mut next = (*draft).clone();
        next.set_field(field, event_value(&e));
        draft.set(next);

        if errors.get(field).is_some() {
            let mut remaining = (*errors).clone();
            remaining.clear(field);
            errors.set(remaining);
        }
    })
}

/// Runs validation, storing the errors; returns the draft only when it passed.
pub fn checked_submit<D: Draft>(draft: &D, errors: &UseStateHandle<FormErrors>) -> Option<D> {
    match draft.validate() {
        Ok(()) => {
            errors.set(FormErrors::default());
            Some(draft.clone())
        }
        Err(found) => {
            tracing::debug!(invalid = found.len(), "form rejected");
            errors.set(found);
            None
        }
    }
}

pub fn input_class(errors: &FormErrors, field: &str) -> Classes {
    classes!("form-input", errors.get(field).is_some().then_some("invalid"))
}

pub fn field_error(errors: &FormErrors, field: &str) -> Html {
    match errors.get(field) {
        Some(message) => html! { <p class="field-error">{ message.to_string() }</p> },
        None => html! {},
    }
}
