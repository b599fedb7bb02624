//! HTML form scanning: fields, their labels and the submit control.

use formfill_core::SubmitButton;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static FIELDS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("input, select, textarea").expect("hardcoded selector"));
static LABELS: Lazy<Selector> = Lazy::new(|| Selector::parse("label").expect("hardcoded selector"));
static BUTTONS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("button, input").expect("hardcoded selector"));

const NON_DATA_TYPES: [&str; 3] = ["submit", "button", "reset"];

/// A named form control with a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledField {
    pub label: String,
    pub name: String,
}

/// Collect labelled data fields in document order.
///
/// Fields without a `name` or without a resolvable label are skipped. When
/// two fields share a label the later field wins and the label keeps its
/// first position.
pub fn scan_fields(document: &Html) -> Vec<LabeledField> {
    let mut fields: Vec<LabeledField> = Vec::new();

    for element in document.select(&FIELDS) {
        let Some(name) = element.value().attr("name") else {
            continue;
        };
        if element
            .value()
            .attr("type")
            .is_some_and(|t| NON_DATA_TYPES.contains(&t))
        {
            continue;
        }
        let Some(label) = label_for(document, element) else {
            tracing::debug!(field = name, "no label found");
            continue;
        };

        match fields.iter_mut().find(|f| f.label == label) {
            Some(existing) => existing.name = name.to_string(),
            None => fields.push(LabeledField {
                label,
                name: name.to_string(),
            }),
        }
    }

    fields
}

/// Resolve the label text for a form control.
///
/// Tried in order: `<label for=id>`, an enclosing `<label>`, then the
/// previous sibling element if it is a `<label>`.
pub fn label_for(document: &Html, element: ElementRef<'_>) -> Option<String> {
    if let Some(id) = element.value().id() {
        if let Some(label) = document
            .select(&LABELS)
            .find(|l| l.value().attr("for") == Some(id))
        {
            return non_empty(label_text(label));
        }
    }

    if let Some(parent) = element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "label")
    {
        return non_empty(label_text(parent));
    }

    element
        .prev_siblings()
        .find_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "label")
        .and_then(|e| non_empty(label_text(e)))
}

/// Every text fragment under the element, trimmed and joined without spaces.
fn label_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

/// Pick the submit control: the first `type="submit"` button or input with
/// an id, else one with a name, else a generic selector.
pub fn find_submit_button(document: &Html) -> SubmitButton {
    for button in document.select(&BUTTONS) {
        let el = button.value();
        if el.attr("type") != Some("submit") {
            continue;
        }
        if let Some(id) = el.id().filter(|id| !id.is_empty()) {
            return SubmitButton::id(id);
        }
        if let Some(name) = el.attr("name").filter(|n| !n.is_empty()) {
            return SubmitButton::name(name);
        }
    }
    SubmitButton::css("[type='submit']")
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_core::SubmitKind;

    fn fields(html: &str) -> Vec<(String, String)> {
        scan_fields(&Html::parse_document(html))
            .into_iter()
            .map(|f| (f.label, f.name))
            .collect()
    }

    #[test]
    fn test_for_label_beats_wrapping_label() {
        let html = r#"
            <label for="em">Email address</label>
            <label>Wrapper <input id="em" name="email"></label>
        "#;
        assert_eq!(
            fields(html),
            vec![("Email address".to_string(), "email".to_string())]
        );
    }

    #[test]
    fn test_wrapping_label() {
        let html = r#"<form><label> Full <b>Name</b> <input name="fullName"></label></form>"#;
        assert_eq!(
            fields(html),
            vec![("FullName".to_string(), "fullName".to_string())]
        );
    }

    #[test]
    fn test_previous_sibling_label() {
        let html = r#"<form><div><label>Phone</label>
            <input name="phone"></div></form>"#;
        assert_eq!(
            fields(html),
            vec![("Phone".to_string(), "phone".to_string())]
        );
    }

    #[test]
    fn test_sibling_must_be_immediate_element() {
        let html = r#"<form><label>Phone</label><span></span><input name="phone"></form>"#;
        assert!(fields(html).is_empty());
    }

    #[test]
    fn test_skips_buttons_and_unnamed() {
        let html = r#"<form>
            <label>Go <input type="submit" name="go"></label>
            <label>Anon <input></label>
            <label>Notes <textarea name="notes"></textarea></label>
            <label>Country <select name="country"><option>UK</option></select></label>
        </form>"#;
        assert_eq!(
            fields(html),
            vec![
                ("Notes".to_string(), "notes".to_string()),
                // Option text inside a wrapping label is part of the label
                ("CountryUK".to_string(), "country".to_string())
            ]
        );
    }

    #[test]
    fn test_duplicate_label_keeps_position_takes_later_name() {
        let html = r#"<form>
            <label>Name <input name="first"></label>
            <label>Email <input name="email"></label>
            <label>Name <input name="second"></label>
        </form>"#;
        assert_eq!(
            fields(html),
            vec![
                ("Name".to_string(), "second".to_string()),
                ("Email".to_string(), "email".to_string())
            ]
        );
    }

    #[test]
    fn test_submit_button_first_in_document_order() {
        let doc = Html::parse_document(
            r#"<button type="button" id="x">No</button>
               <input type="submit" name="send">
               <button type="submit" id="go">Go</button>"#,
        );
        let button = find_submit_button(&doc);
        assert_eq!(button.kind, SubmitKind::Name);
        assert_eq!(button.value, "send");
    }

    #[test]
    fn test_submit_button_fallback() {
        let doc = Html::parse_document("<form><button>Go</button></form>");
        assert_eq!(find_submit_button(&doc), SubmitButton::css("[type='submit']"));
    }
}
