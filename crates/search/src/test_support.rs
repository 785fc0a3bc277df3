//! In-memory `MessageSearchStore` for strategy tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chatio_core::{Candidate, MessageRecord, StoredEmbedding};
use chatio_storage::{MatchedMessage, MessageSearchStore, StorageError};

pub(crate) fn record(id: &str) -> MessageRecord {
    MessageRecord {
        id: id.to_owned(),
        conversation_id: "conv".to_owned(),
        author_id: "author".to_owned(),
        content: format!("message {id}"),
        created_at: None,
    }
}

#[derive(Default)]
pub(crate) struct FakeSearchStore {
    /// `None` makes the probe fail.
    pub has_function: Option<bool>,
    pub matches: Vec<MatchedMessage>,
    pub candidates: Vec<(String, StoredEmbedding)>,
    pub match_args: Mutex<Option<(f64, usize)>>,
    pub fetch_limit: Mutex<Option<usize>>,
}

impl FakeSearchStore {
    pub fn with_matches(rows: Vec<(&str, Option<f64>)>) -> Self {
        let matches = rows
            .into_iter()
            .map(|(id, similarity)| MatchedMessage { message: record(id), similarity })
            .collect();
        Self { has_function: Some(true), matches, ..Default::default() }
    }

    pub fn with_candidates(rows: Vec<(&str, StoredEmbedding)>) -> Self {
        let candidates = rows.into_iter().map(|(id, e)| (id.to_owned(), e)).collect();
        Self { has_function: Some(false), candidates, ..Default::default() }
    }

    pub fn last_match_args(&self) -> Option<(f64, usize)> {
        *self.match_args.lock().unwrap()
    }

    pub fn last_fetch_limit(&self) -> Option<usize> {
        *self.fetch_limit.lock().unwrap()
    }
}

#[async_trait]
impl MessageSearchStore for FakeSearchStore {
    async fn has_match_function(&self) -> Result<bool, StorageError> {
        self.has_function.ok_or_else(|| StorageError::InvalidInput("probe unavailable".to_owned()))
    }

    async fn match_messages(
        &self,
        _query: &[f64],
        threshold: f64,
        limit: usize,
    ) -> Result<Vec<MatchedMessage>, StorageError> {
        *self.match_args.lock().unwrap() = Some((threshold, limit));
        Ok(self.matches.clone())
    }

    async fn fetch_embedded_messages(
        &self,
        limit: usize,
    ) -> Result<Vec<Candidate<MessageRecord>>, StorageError> {
        *self.fetch_limit.lock().unwrap() = Some(limit);
        Ok(self
            .candidates
            .iter()
            .take(limit)
            .map(|(id, embedding)| Candidate::new(record(id), embedding.clone()))
            .collect())
    }
}
