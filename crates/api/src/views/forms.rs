//! HTML form rendering.
//!
//! A form type describes itself as a list of [`Field`]s through
//! [`FormView`]; [`render_form`] turns that list plus any [`FieldErrors`]
//! into markup. Submitted values are echoed back so a rejected form keeps
//! what the user typed.

use library_core::types::DbId;
use library_core::validation::FieldErrors;
use library_db::models::choice::{Choice, FormChoices};

use super::escape;

/// Key for errors that belong to the whole form rather than one field.
pub const FORM_ERROR: &str = "form";

/// How one field is entered.
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    Text,
    Email,
    /// Never echoes the submitted value.
    Password,
    TextArea,
    Number,
    Hidden,
    /// A dropdown with a blank "none" option first.
    Select(&'a [Choice]),
}

/// One labelled form field and its current value.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    pub name: &'static str,
    pub label: &'static str,
    pub input: Input<'a>,
    pub value: String,
}

impl<'a> Field<'a> {
    pub fn text(name: &'static str, label: &'static str, value: &str) -> Self {
        Self::new(name, label, Input::Text, value.to_string())
    }

    pub fn email(name: &'static str, label: &'static str, value: &str) -> Self {
        Self::new(name, label, Input::Email, value.to_string())
    }

    pub fn password(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, Input::Password, String::new())
    }

    pub fn textarea(name: &'static str, label: &'static str, value: Option<&str>) -> Self {
        Self::new(name, label, Input::TextArea, value.unwrap_or_default().to_string())
    }

    pub fn optional_text(name: &'static str, label: &'static str, value: Option<&str>) -> Self {
        Self::text(name, label, value.unwrap_or_default())
    }

    pub fn number(name: &'static str, label: &'static str, value: Option<i32>) -> Self {
        Self::new(name, label, Input::Number, opt_to_string(value))
    }

    pub fn hidden(name: &'static str, value: &str) -> Self {
        Self::new(name, "", Input::Hidden, value.to_string())
    }

    pub fn select(
        name: &'static str,
        label: &'static str,
        choices: &'a [Choice],
        selected: Option<DbId>,
    ) -> Self {
        Self::new(name, label, Input::Select(choices), opt_to_string(selected))
    }

    fn new(name: &'static str, label: &'static str, input: Input<'a>, value: String) -> Self {
        Self {
            name,
            label,
            input,
            value,
        }
    }

    fn render(&self, errors: &[String]) -> String {
        let name = self.name;
        let value = escape(&self.value);
        let control = match self.input {
            Input::Hidden => {
                return format!(r#"<input type="hidden" name="{name}" value="{value}">"#);
            }
            Input::Text => format!(r#"<input type="text" id="{name}" name="{name}" value="{value}">"#),
            Input::Email => {
                format!(r#"<input type="email" id="{name}" name="{name}" value="{value}">"#)
            }
            Input::Password => format!(r#"<input type="password" id="{name}" name="{name}">"#),
            Input::Number => {
                format!(r#"<input type="number" id="{name}" name="{name}" value="{value}">"#)
            }
            Input::TextArea => {
                format!(r#"<textarea id="{name}" name="{name}" rows="4">{value}</textarea>"#)
            }
            Input::Select(choices) => {
                let mut options = String::from(r#"<option value="">--</option>"#);
                for choice in choices {
                    let id = choice.id.to_string();
                    let selected = if id == self.value { " selected" } else { "" };
                    options.push_str(&format!(
                        r#"<option value="{id}"{selected}>{}</option>"#,
                        escape(&choice.label)
                    ));
                }
                format!(r#"<select id="{name}" name="{name}">{options}</select>"#)
            }
        };

        let messages: String = errors
            .iter()
            .map(|m| format!(r#"<span class="error">{}</span>"#, escape(m)))
            .collect();

        format!(
            r#"<p><label for="{name}">{}</label><br>{control} {messages}</p>"#,
            escape(self.label)
        )
    }
}

fn opt_to_string<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// A form that knows how to lay itself out.
pub trait FormView {
    /// Whether [`FormView::fields`] reads the select choices.
    const NEEDS_CHOICES: bool = false;

    fn fields<'a>(&self, choices: &'a FormChoices) -> Vec<Field<'a>>;
}

/// Render a POST form. Errors for fields not on the form are listed on top.
pub fn render_form(action: &str, fields: &[Field<'_>], errors: &FieldErrors, submit: &str) -> String {
    let known: Vec<&str> = fields.iter().map(|f| f.name).collect();
    let stray: String = errors
        .iter()
        .filter(|(field, _)| !known.contains(field))
        .flat_map(|(_, messages)| messages.iter())
        .map(|m| format!(r#"<p class="error">{}</p>"#, escape(m)))
        .collect();

    let body: String = fields
        .iter()
        .map(|field| field.render(errors.get(field.name)))
        .collect::<Vec<_>>()
        .join("\n        ");

    format!(
        r#"{stray}<form method="post" action="{}">
        {body}
        <p><button type="submit">{}</button></p>
    </form>"#,
        escape(action),
        escape(submit)
    )
}

/// A button that deletes `url` and then goes to `back`.
pub fn delete_button(url: &str, back: &str) -> String {
    format!(
        r#"<button type="button" id="delete">Delete</button>
    <script>
        document.getElementById('delete').addEventListener('click', async () => {{
            if (!confirm('Are you sure you want to delete this entry?')) return;
            const res = await fetch('{url}', {{ method: 'DELETE' }});
            const body = await res.json();
            if (body.success) {{
                window.location.replace('{back}');
            }} else {{
                alert(body.error || 'Delete failed.');
            }}
        }});
    </script>"#,
        url = escape(url),
        back = escape(back),
    )
}
