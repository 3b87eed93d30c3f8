use url::Url;

use super::session::{ChatMessage, Role};
use crate::gemini::Source;

/// Host of `uri` without a leading `www.`, or the raw string when it does not parse.
pub fn display_host(uri: &str) -> String {
    Url::parse(uri)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .map(|host| host.strip_prefix("www.").unwrap_or(&host).to_string())
        .unwrap_or_else(|| uri.to_string())
}

pub fn render_message(message: &ChatMessage) -> String {
    let label = match message.role {
        Role::User => "You",
        Role::Model => "DigiTravel Guide",
    };
    let status = if message.is_error { " (connection error)" } else { "" };
    let mut output = format!("[#{} {label}{status}]\n{}\n", message.id, message.text);

    if message.role == Role::Model && !message.sources.is_empty() {
        output.push_str("\nVerified Sources\n");
        for source in &message.sources {
            output.push_str(&render_source(source));
        }
    }
    output
}

fn render_source(source: &Source) -> String {
    format!(
        "- {} ({})  {}\n",
        source.title,
        display_host(&source.uri),
        source.uri
    )
}
