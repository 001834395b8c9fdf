use crate::core::rows::{render_rows, RowView};
use crate::core::{OrderingPolicy, SearchProvider, University};
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

pub type RequestToken = u64;

pub const ERROR_DIALOG_TITLE: &str = "Error";
pub const ERROR_DIALOG_ACTION: &str = "Ok";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    Idle,
    Loading,
    Loaded { count: usize },
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDialog {
    pub title: &'static str,
    pub message: String,
    pub action: &'static str,
}

/// Completion of one search, delivered to the thread that owns the controller.
#[derive(Debug)]
pub struct SearchMessage {
    pub token: RequestToken,
    pub query: String,
    pub outcome: Result<Vec<University>>,
}

/// State of the search screen. Lives as long as the screen is shown.
///
/// Network work runs on spawned tasks; their results only come back through
/// the internal channel and are applied by [`SearchController::apply`], so
/// results and loading state are only ever touched by the owner.
pub struct SearchController<P: SearchProvider + 'static> {
    provider: Arc<P>,
    policy: OrderingPolicy,
    state: ScreenState,
    query: String,
    input_focused: bool,
    results: Vec<University>,
    rows: Vec<RowView>,
    loading: bool,
    dialog: Option<ErrorDialog>,
    last_issued: RequestToken,
    sender: UnboundedSender<SearchMessage>,
    receiver: UnboundedReceiver<SearchMessage>,
}

impl<P: SearchProvider + 'static> SearchController<P> {
    pub fn new(provider: P, policy: OrderingPolicy) -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            provider: Arc::new(provider),
            policy,
            state: ScreenState::Idle,
            query: String::new(),
            input_focused: true,
            results: Vec::new(),
            rows: Vec::new(),
            loading: false,
            dialog: None,
            last_issued: 0,
            sender,
            receiver,
        }
    }

    /// Initial mount: load the unfiltered list.
    pub fn activate(&mut self) -> RequestToken {
        self.issue(String::new())
    }

    pub fn on_text_changed(&mut self, text: &str) -> RequestToken {
        self.query = text.to_string();
        self.issue(self.query.clone())
    }

    /// Clearing always proceeds, whatever is in flight.
    pub fn on_clear(&mut self) -> bool {
        self.query.clear();
        self.issue(String::new());
        true
    }

    /// Return key: leaves the input, no new search.
    pub fn on_submit(&mut self) {
        self.input_focused = false;
    }

    pub fn focus_input(&mut self) {
        self.input_focused = true;
    }

    pub fn dismiss_error(&mut self) {
        self.dialog = None;
    }

    fn issue(&mut self, query: String) -> RequestToken {
        self.last_issued += 1;
        let token = self.last_issued;
        self.state = ScreenState::Loading;
        self.loading = true;

        tracing::debug!("Issuing search #{} for {:?}", token, query);

        let provider = Arc::clone(&self.provider);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let outcome = provider.search(&query).await;
            // The receiver is gone once the screen is dropped.
            let _ = sender.send(SearchMessage {
                token,
                query,
                outcome,
            });
        });

        token
    }

    /// Apply every completion that has already arrived. Returns how many were applied.
    pub fn process_messages(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.receiver.try_recv() {
            if self.apply(message) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next completion without applying it.
    pub async fn next_message(&mut self) -> Option<SearchMessage> {
        self.receiver.recv().await
    }

    /// Returns `false` when the message was discarded as stale.
    pub fn apply(&mut self, message: SearchMessage) -> bool {
        if self.policy == OrderingPolicy::LatestIssued && message.token < self.last_issued {
            tracing::debug!(
                "Discarding stale search #{} for {:?} (latest is #{})",
                message.token,
                message.query,
                self.last_issued
            );
            return false;
        }

        self.loading = false;
        match message.outcome {
            Ok(universities) => {
                tracing::info!(
                    "Search #{} for {:?} returned {} universities",
                    message.token,
                    message.query,
                    universities.len()
                );
                self.rows = render_rows(&universities);
                self.results = universities;
                self.state = ScreenState::Loaded {
                    count: self.results.len(),
                };
            }
            Err(e) => {
                tracing::warn!(
                    "Search #{} for {:?} failed ({:?}): {}",
                    message.token,
                    message.query,
                    e.category(),
                    e
                );
                let text = e.to_string();
                self.dialog = Some(ErrorDialog {
                    title: ERROR_DIALOG_TITLE,
                    message: text.clone(),
                    action: ERROR_DIALOG_ACTION,
                });
                self.state = ScreenState::Error(text);
            }
        }
        true
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn results(&self) -> &[University] {
        &self.results
    }

    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn dialog(&self) -> Option<&ErrorDialog> {
        self.dialog.as_ref()
    }

    pub fn policy(&self) -> OrderingPolicy {
        self.policy
    }
}
