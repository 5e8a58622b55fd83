//! Message composition for Matrix room events.

use std::io::{self, BufRead};

use serde::{Deserialize, Serialize};

/// Message type for text room messages.
pub const MSG_TYPE: &str = "m.text";

/// Format tag for HTML-formatted bodies.
pub const MSG_FORMAT: &str = "org.matrix.custom.html";

/// Sender shown in the mail header when no `-F` value was given.
pub const UNDEFINED_SENDER: &str = "undefined";

/// The one event payload this tool sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomMessage {
    pub msgtype: String,
    pub format: String,
    pub body: String,
    pub formatted_body: String,
}

impl RoomMessage {
    /// Message sent as-is: body and formatted body are identical.
    pub fn plain(text: &str) -> Self {
        Self {
            msgtype: MSG_TYPE.to_string(),
            format: MSG_FORMAT.to_string(),
            body: text.to_string(),
            formatted_body: text.to_string(),
        }
    }
}

/// Escape `<` and `>` for the HTML body. Nothing else is escaped.
pub fn escape_html(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// Hostname for the mail header.
pub fn local_hostname() -> String {
    gethostname::gethostname()
        .into_string()
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Compose the mail-gateway message: `host:`/`sender:` headings followed by
/// the input wrapped in a `<code>` block, one `<br>` per line.
pub fn compose_mail(lines: &[String], sender: Option<&str>) -> RoomMessage {
    let sender = sender.unwrap_or(UNDEFINED_SENDER);

    let mut formatted = format!(
        "<h4>host: {}</h4><h4>sender: {}</h4><code>",
        escape_html(&local_hostname()),
        escape_html(sender)
    );
    for line in lines {
        formatted.push_str(&escape_html(line));
        formatted.push_str("<br>");
    }
    formatted.push_str("</code>");

    RoomMessage {
        msgtype: MSG_TYPE.to_string(),
        format: MSG_FORMAT.to_string(),
        body: lines.join("\n"),
        formatted_body: formatted,
    }
}

/// Read a single line from standard input, without the trailing newline.
pub fn read_stdin_line() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Read all of standard input as lines.
pub fn read_stdin_lines() -> io::Result<Vec<String>> {
    io::stdin().lock().lines().collect()
}
