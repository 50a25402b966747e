//! Standalone HTML pages showing a finished animation or the request errors.

use std::path::PathBuf;

use base64::Engine as _;

const TITLE: &str = "Gif Creator UI";

const STYLE: &str = r#"
      body { font-family: arial, sans-serif; }
      .result img { max-width: 100%; }
      .errors {
        padding: 1em;
        margin: 1em;
        color: #F70015;
        background-color: #FFD9DC;
        font-weight: bold;
        border: solid 1px #F70015;
        border-radius: 3px;
      }
      .errors pre { color: #333; font-weight: normal; }
"#;

/// Page embedding `gif` inline as a `data:image/gif;base64` URI.
pub fn render_result_page(gif: &[u8]) -> String {
    let data = base64::engine::general_purpose::STANDARD.encode(gif);
    let body = format!(
        "    <div class=\"result\"><img src=\"data:image/gif;base64,{data}\" alt=\"animated sequence\"></div>\n"
    );
    wrap(&body)
}

/// Page listing `errors` followed by the paths that were submitted.
pub fn render_error_page(errors: &[String], submitted: &[PathBuf]) -> String {
    let mut body = String::new();
    body.push_str("    <div class=\"errors\">\n");
    body.push_str("      The following error(s) occurred:\n      <ul>\n");
    for e in errors {
        body.push_str(&format!("        <li>{}</li>\n", escape_html(e)));
    }
    body.push_str("      </ul>\n");
    if !submitted.is_empty() {
        body.push_str("      <pre>");
        for (i, p) in submitted.iter().enumerate() {
            if i > 0 {
                body.push('\n');
            }
            body.push_str(&escape_html(&p.to_string_lossy()));
        }
        body.push_str("</pre>\n");
    }
    body.push_str("    </div>\n");
    wrap(&body)
}

fn wrap(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n  <head>\n    <meta charset=\"utf-8\" />\n    <title>{TITLE}</title>\n    <style>{STYLE}    </style>\n  </head>\n  <body>\n{body}  </body>\n</html>\n"
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/ui/page.rs"]
mod tests;
