//! Server-rendered pages
//!
//! Templates are plain HTML with `{{name}}` placeholders. Every substituted
//! value is HTML-escaped.

const LOGIN_TEMPLATE: &str = include_str!("../../templates/login.html");
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Browser-side recorder, served at /static/recorder.js
pub const RECORDER_JS: &str = include_str!("../../static/recorder.js");

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn login_page() -> String {
    LOGIN_TEMPLATE.to_string()
}

pub fn index_page(username: &str, prompts: &[String]) -> String {
    let items: String = prompts
        .iter()
        .enumerate()
        .map(|(i, prompt)| {
            format!(
                "      <li class=\"prompt\" data-index=\"{index}\">\n        \
                 <span class=\"prompt-text\">{text}</span>\n        \
                 <span class=\"prompt-state\">Not recorded</span>\n        \
                 <button type=\"button\" class=\"record\">Record</button>\n        \
                 <button type=\"button\" class=\"stop\" disabled>Stop</button>\n        \
                 <button type=\"button\" class=\"delete\" disabled>Delete</button>\n      \
                 </li>\n",
                index = i,
                text = escape_html(prompt),
            )
        })
        .collect();

    INDEX_TEMPLATE
        .replace("{{username}}", &escape_html(username))
        .replace("{{prompt_count}}", &prompts.len().to_string())
        .replace("{{prompts}}", &items)
}
