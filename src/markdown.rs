use crate::gemini::GuideResponse;

/// Escape characters that break Markdown link syntax: `[`, `]`, `(`, `)`.
pub(crate) fn escape_md_link(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '[' | ']' | '(' | ')') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Replace newlines (which would break heading structure) with spaces.
pub(crate) fn sanitize_heading(s: &str) -> String {
    s.replace(['\n', '\r'], " ")
}

/// Answer text followed by a linked source list.
pub(crate) fn format_answer(response: &GuideResponse) -> String {
    let mut output = response.text.clone();

    if !response.sources.is_empty() {
        output.push_str("\n\n---\n**Sources:**\n");
        for source in &response.sources {
            let title = if source.title.is_empty() {
                &source.uri
            } else {
                &source.title
            };
            output.push_str(&format!(
                "- [{}]({})\n",
                escape_md_link(title),
                escape_md_link(&source.uri)
            ));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::Source;

    #[test]
    fn escapes_link_breaking_chars() {
        assert_eq!(escape_md_link("Kyoto Guide"), "Kyoto Guide");
        assert_eq!(
            escape_md_link("Fushimi Inari (Kyoto) [map]"),
            r"Fushimi Inari \(Kyoto\) \[map\]"
        );
    }

    #[test]
    fn sanitize_heading_replaces_newlines() {
        assert_eq!(sanitize_heading("Jardin\nMajorelle\r"), "Jardin Majorelle ");
    }

    #[test]
    fn answer_without_sources_is_plain_text() {
        let response = GuideResponse {
            text: "Spring is ideal.".into(),
            sources: vec![],
        };
        assert_eq!(format_answer(&response), "Spring is ideal.");
    }

    #[test]
    fn answer_lists_sources_in_order() {
        let response = GuideResponse {
            text: "Spring is ideal.".into(),
            sources: vec![
                Source {
                    title: "JapanGuide".into(),
                    uri: "https://japan-guide.com/kyoto".into(),
                },
                Source {
                    title: String::new(),
                    uri: "https://kyoto.travel".into(),
                },
            ],
        };

        let text = format_answer(&response);

        assert!(text.starts_with("Spring is ideal.\n\n---\n**Sources:**\n"));
        let japan = text.find("[JapanGuide](https://japan-guide.com/kyoto)").unwrap();
        let kyoto = text.find("[https://kyoto.travel](https://kyoto.travel)").unwrap();
        assert!(japan < kyoto);
    }
}
