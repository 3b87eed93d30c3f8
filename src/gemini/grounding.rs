use std::collections::HashSet;

use tracing::warn;

use super::types::{GenerateContentResponse, GroundingChunk, GuideResponse, Source};

pub const FALLBACK_ANSWER: &str = "I couldn't find an answer to that at the moment.";

pub fn normalize_response(response: &GenerateContentResponse) -> GuideResponse {
    let candidate = response.candidates.as_ref().and_then(|c| c.first());

    let text = candidate
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect::<String>()
        })
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| {
            warn!("Gemini returned empty answer (safety filter or empty response)");
            FALLBACK_ANSWER.to_string()
        });

    let sources = candidate
        .and_then(|c| c.grounding_metadata.as_ref())
        .and_then(|m| m.grounding_chunks.as_deref())
        .map(web_sources)
        .unwrap_or_default();

    GuideResponse { text, sources }
}

/// Projects web chunks to sources, keeping the first chunk seen for each URI.
fn web_sources(chunks: &[GroundingChunk]) -> Vec<Source> {
    let mut seen = HashSet::new();
    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| Source {
            title: web.title.clone().unwrap_or_default(),
            uri: web.uri.clone().unwrap_or_default(),
        })
        .filter(|source| seen.insert(source.uri.clone()))
        .collect()
}
