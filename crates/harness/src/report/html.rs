// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Converting marked-up report text to HTML.

use helpfultests_compare::markup::{
    debold_char, is_marker, BOLD_MARK, STRIKE_MARK, UNDERLINE_MARK,
};

const BOLD_OPEN: &str = r#"<b style="font-style:italic;font-weight:bolder;color:green;">"#;
const INS_OPEN: &str = r#"<ins style="text-decoration:underline;background-color:#d4fcbc;">"#;
const DEL_OPEN: &str = r#"<del style="text-decoration:line-through;background-color:#fbb;color:#555;">"#;

enum Transition {
    Open(&'static str),
    Close(&'static str),
}

/// One emphasis style. Styles never nest inside themselves.
struct Style {
    marker: char,
    open: &'static str,
    close: &'static str,
    active: bool,
}

impl Style {
    const fn new(marker: char, open: &'static str, close: &'static str) -> Self {
        Self {
            marker,
            open,
            close,
            active: false,
        }
    }

    /// A marker opens the style unless it is already open. The first
    /// character not preceded by a marker closes it.
    fn transition(&mut self, raw: char, last: Option<char>) -> Option<Transition> {
        if raw == self.marker {
            let opened = !self.active;
            self.active = true;
            opened.then_some(Transition::Open(self.open))
        } else if self.active && last != Some(self.marker) {
            self.active = false;
            Some(Transition::Close(self.close))
        } else {
            None
        }
    }
}

fn escape(ch: char) -> Option<&'static str> {
    match ch {
        '\n' => Some("<br>"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&apos;"),
        _ => None,
    }
}

/// Render `text` as a `<pre>` block, turning bold, underline and strike
/// markers into `<b>`, `<ins>` and `<del>`.
pub fn to_html(text: &str) -> String {
    let mut styles = [
        Style::new(BOLD_MARK, BOLD_OPEN, "</b>"),
        Style::new(UNDERLINE_MARK, INS_OPEN, "</ins>"),
        Style::new(STRIKE_MARK, DEL_OPEN, "</del>"),
    ];
    let mut out = String::from("<pre>");
    let mut last = None;
    for raw in text.chars() {
        let mut opened = None;
        for style in &mut styles {
            match style.transition(raw, last) {
                Some(Transition::Open(tag)) => opened = Some(tag),
                Some(Transition::Close(tag)) => out.push_str(tag),
                None => {}
            }
        }
        out.extend(opened);
        if !is_marker(raw) {
            match escape(raw) {
                Some(escaped) => out.push_str(escaped),
                None => out.push(debold_char(raw)),
            }
        }
        last = Some(raw);
    }
    for style in &styles {
        if style.active {
            out.push_str(style.close);
        }
    }
    out.push_str("</pre>");
    out
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod tests;
