//! LLM re-ranking and summarization of semantic search hits.

use async_trait::async_trait;
use chatio_core::{SearchHit, extract_json_object};

use crate::ai_types::{ChatRequest, EnhancementJson, Message, ResponseFormat};
use crate::client::{LlmClient, truncate};
use crate::error::LlmError;

/// Per-hit content budget in the enhancement prompt.
const MAX_HIT_CONTENT_LEN: usize = 500;

/// Enhanced view of a ranked result list.
#[derive(Debug, Clone, PartialEq)]
pub struct Enhancement {
    /// Same hits as the input, possibly reordered.
    pub results: Vec<SearchHit>,
    pub summary: Option<String>,
}

/// Post-processes ranked search hits. Failures must be recoverable by the caller.
#[async_trait]
pub trait SearchEnhancer: Send + Sync {
    async fn enhance(&self, query: &str, hits: &[SearchHit]) -> Result<Enhancement, LlmError>;
}

#[async_trait]
impl SearchEnhancer for LlmClient {
    async fn enhance(&self, query: &str, hits: &[SearchHit]) -> Result<Enhancement, LlmError> {
        if hits.is_empty() {
            return Ok(Enhancement { results: Vec::new(), summary: None });
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message { role: "user".to_owned(), content: build_prompt(query, hits) }],
            response_format: ResponseFormat { format_type: "json_object".to_owned() },
        };
        let content = self.chat_completion(&request).await?;
        let payload = extract_json_object(&content).unwrap_or(&content);
        let parsed: EnhancementJson = serde_json::from_str(payload)
            .map_err(|e| LlmError::JsonParse {
                context: format!("search enhancement (content: {})", truncate(&content, 200)),
                source: e,
            })?;

        let summary = parsed.summary.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());
        tracing::debug!(
            hits = hits.len(),
            ranked_ids = parsed.ranked_ids.len(),
            has_summary = summary.is_some(),
            "search results enhanced"
        );
        Ok(Enhancement { results: reorder_hits(hits, &parsed.ranked_ids), summary })
    }
}

fn build_prompt(query: &str, hits: &[SearchHit]) -> String {
    let listing = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "{}. id={} similarity={} content: {}",
                i + 1,
                hit.id(),
                hit.similarity,
                truncate(&hit.message.content, MAX_HIT_CONTENT_LEN)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"A user searched their chat history for: "{query}"

These messages were retrieved by semantic similarity:
{listing}

Order the messages from most to least relevant to the search and write a
one or two sentence summary of what they say about it.

Return JSON: {{"summary": "...", "ranked_ids": ["<id>", ...]}}
Only use ids from the list above."#
    )
}

/// Reorder `hits` by `ranked_ids`.
///
/// Unknown and repeated ids are ignored; hits not mentioned keep their
/// relative order after the mentioned ones. The output is a permutation of
/// the input.
#[must_use]
pub fn reorder_hits(hits: &[SearchHit], ranked_ids: &[String]) -> Vec<SearchHit> {
    let mut taken = vec![false; hits.len()];
    let mut ordered = Vec::with_capacity(hits.len());

    for id in ranked_ids {
        let position = hits
            .iter()
            .zip(taken.iter())
            .position(|(hit, used)| !*used && hit.id() == id.as_str());
        if let Some(index) = position
            && let (Some(hit), Some(flag)) = (hits.get(index), taken.get_mut(index))
        {
            *flag = true;
            ordered.push(hit.clone());
        }
    }

    for (hit, used) in hits.iter().zip(taken) {
        if !used {
            ordered.push(hit.clone());
        }
    }
    ordered
}
