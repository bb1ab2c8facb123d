use crate::core::{LatLng, SessionToken, Suggestion};
use crate::provider::SuggestionQuery;
use crate::task::{CommitInvocation, SearchCompletion, SearchInvocation, TaskRunState};

#[derive(Debug)]
pub enum SearchStep {
    /// The text was empty; suggestions and the session token are gone.
    Cleared,
    Query(SearchInvocation),
}

/// Suggestions for the search box, and the provider session they are billed
/// under.
///
/// The session token is minted on the first search of an episode and reused
/// by every search that follows, until [`SuggestionSession::reset`] or an
/// emptied search field ends the episode.
#[derive(Debug, Default)]
pub struct SuggestionSession {
    session_token: Option<SessionToken>,
    suggestions: Vec<Suggestion>,
    highlighted: Option<usize>,
    searches: TaskRunState,
    commits: TaskRunState,
}

impl SuggestionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.suggestions.as_slice()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn session_token(&self) -> Option<&SessionToken> {
        self.session_token.as_ref()
    }

    pub fn is_searching(&self) -> bool {
        self.searches.is_running()
    }

    pub fn is_committing(&self) -> bool {
        self.commits.is_running()
    }

    pub fn search(&mut self, text: &str, origin: Option<LatLng>) -> SearchStep {
        let text = text.trim();
        if text.is_empty() {
            self.searches.invalidate();
            self.replace_suggestions(Vec::new());
            self.session_token = None;
            return SearchStep::Cleared;
        }

        let token = self
            .session_token
            .get_or_insert_with(|| {
                let token = SessionToken::mint();
                tracing::debug!(token = %token, "search session started");
                token
            })
            .clone();
        let run_id = self.searches.next_run_id();
        self.searches.on_started(run_id);

        SearchStep::Query(SearchInvocation {
            run_id,
            query: SuggestionQuery {
                input: text.to_string(),
                session_token: token,
                origin,
            },
        })
    }

    /// Applies a search result unless a newer search has been issued since.
    /// Returns whether the suggestion list was replaced.
    pub fn apply_results(&mut self, completion: SearchCompletion) -> bool {
        if !self.searches.on_finished(completion.run_id) {
            tracing::trace!(run_id = completion.run_id, "discarding stale suggestions");
            return false;
        }

        match completion.result {
            Ok(suggestions) => {
                tracing::debug!(
                    run_id = completion.run_id,
                    count = suggestions.len(),
                    "suggestions received"
                );
                self.replace_suggestions(suggestions);
            }
            Err(err) => {
                tracing::warn!(
                    run_id = completion.run_id,
                    error = %err,
                    "suggestion search failed"
                );
                self.replace_suggestions(Vec::new());
            }
        }
        true
    }

    pub fn highlight(&mut self, index: usize) -> bool {
        if index >= self.suggestions.len() {
            return false;
        }
        self.highlighted = Some(index);
        true
    }

    pub fn highlight_next(&mut self) -> bool {
        let len = self.suggestions.len();
        if len == 0 {
            return false;
        }
        let next = match self.highlighted {
            Some(index) => (index + 1) % len,
            None => 0,
        };
        self.highlight(next)
    }

    pub fn highlight_previous(&mut self) -> bool {
        let len = self.suggestions.len();
        if len == 0 {
            return false;
        }
        let previous = match self.highlighted {
            Some(0) | None => len - 1,
            Some(index) => index - 1,
        };
        self.highlight(previous)
    }

    /// Starts resolving the suggestion at `index`. The list is left intact
    /// so a failed resolution can be retried.
    pub fn commit(&mut self, index: usize) -> Option<CommitInvocation> {
        let suggestion = self.suggestions.get(index)?.clone();
        let run_id = self.commits.next_run_id();
        self.commits.on_started(run_id);
        Some(CommitInvocation {
            run_id,
            index,
            suggestion,
        })
    }

    /// Whether a commit completion is the most recent one and may be applied.
    pub fn accept_commit(&mut self, run_id: u64) -> bool {
        self.commits.on_finished(run_id)
    }

    pub fn reset(&mut self) {
        if let Some(token) = self.session_token.take() {
            tracing::debug!(token = %token, "search session ended");
        }
        self.replace_suggestions(Vec::new());
        self.searches.invalidate();
        self.commits.invalidate();
    }

    fn replace_suggestions(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        self.highlighted = None;
    }
}
