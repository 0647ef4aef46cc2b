use chrono::{DateTime, Local, Utc};
use pulldown_cmark::{html, Event as MdEvent, Options, Parser};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::{AttrValue, Html, TargetCast};

pub fn set_panic_hook() {
    // Better error messages in the browser console if the code ever panics.
    // https://github.com/rustwasm/console_error_panic_hook#readme
    console_error_panic_hook::set_once();
}

/// Markdown to HTML. Raw HTML in the source is emitted as escaped text.
pub fn markdown_to_html(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(text, options).map(|event| match event {
        MdEvent::SoftBreak => MdEvent::HardBreak,
        MdEvent::Html(raw) => MdEvent::Text(raw),
        _ => event,
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    format!(r#"<div class="markdown-body">{}</div>"#, html_output)
}

pub fn render_markdown(text: &str) -> Html {
    Html::from_html_unchecked(AttrValue::from(markdown_to_html(text)))
}

/// Local wall-clock time of a message, e.g. `14:05`.
pub fn format_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

/// Value of whichever form control fired the event. Checkboxes yield `true`/`false`.
pub fn event_value<E: TargetCast>(e: &E) -> String {
    if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
        if input.type_() == "checkbox" {
            input.checked().to_string()
        } else {
            input.value()
        }
    } else if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn time_is_hours_and_minutes() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 8, 7, 0).unwrap();
        let formatted = format_time(&ts);
        let (hours, minutes) = formatted.split_once(':').unwrap();
        assert_eq!(hours.len(), 2);
        assert_eq!(minutes.len(), 2);
        assert!(hours.parse::<u8>().unwrap() < 24);
        assert!(minutes.parse::<u8>().unwrap() < 60);
    }

    #[test]
    fn inline_html_is_escaped() {
        let out = markdown_to_html("hi <img src=x onerror=\"alert(1)\">");
        assert!(!out.contains("<img"), "{}", out);
        assert!(out.contains("&lt;img src=x onerror="));
    }

    #[test]
    fn block_html_is_escaped() {
        let out = markdown_to_html("<script>alert(1)</script>\n\n**bold**");
        assert!(!out.contains("<script>"), "{}", out);
        assert!(out.contains("&lt;script&gt;"));
        assert!(out.contains("<strong>bold</strong>"));
    }

    #[test]
    fn code_spans_keep_their_markup_escaped() {
        let out = markdown_to_html("use `<div>` here");
        assert!(out.contains("<code>&lt;div&gt;</code>"));
    }
}
