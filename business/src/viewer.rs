//! Remote table viewer: fetch a JSON collection, show it as a table in the
//! data modal, or show why it could not be loaded.
//!
//! Flow per invocation: `Idle -> Loading -> {Rendered | Errored}`. A
//! cancelled invocation goes from `Loading` back to `Idle`.
//!
//! Invocations are independent. Two overlapping [`RemoteTableViewer::show`]
//! calls both write to the same modal and whichever response arrives last
//! wins. Callers that want to drop a stale request use
//! [`RemoteTableViewer::spawn_show`] and cancel the returned [`ViewTask`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::BusinessConfig;
use crate::api::{ApiError, ApiResult, api_request};
use crate::http::{Client, HttpTransport};
use crate::table::TableView;
use crate::ui::{ModalBody, UiToolkit};

/// Where the latest invocation stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing requested yet, or the latest request was cancelled.
    #[default]
    Idle,

    /// Placeholder shown, request in flight.
    Loading,

    /// The collection was rendered as this table.
    Rendered(TableView),

    /// Loading failed; the modal shows this message.
    Errored(String),
}

impl ViewState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rendered(_) | Self::Errored(_))
    }
}

pub struct RemoteTableViewer<T, U> {
    config: BusinessConfig,
    transport: T,
    ui: U,
    state: Mutex<ViewState>,
    generation: AtomicU64,
}

impl<T, U> RemoteTableViewer<T, U>
where
    T: HttpTransport,
    U: UiToolkit,
{
    pub fn new(config: BusinessConfig, transport: T, ui: U) -> Self {
        Self {
            config,
            transport,
            ui,
            state: Mutex::new(ViewState::Idle),
            generation: AtomicU64::new(0),
        }
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// State of the most recent invocation to reach a transition.
    pub fn state(&self) -> ViewState {
        self.lock_state().clone()
    }

    /// Show `endpoint` as a table in the modal titled `title`.
    ///
    /// Never fails: transport and decode errors end up in the modal. The
    /// returned state is the one this invocation finished in.
    #[instrument(skip(self), name = "show_table")]
    pub async fn show(&self, endpoint: &str, title: &str) -> ViewState {
        self.next_generation();
        self.begin(title);
        let outcome = self.load(endpoint).await;
        self.finish(title, outcome)
    }

    /// Like [`RemoteTableViewer::show`], but gives up if `cancel` fires
    /// before the response is in.
    ///
    /// A cancelled invocation returns [`ViewState::Idle`]. If no newer
    /// invocation has started meanwhile, the viewer goes back to `Idle` and
    /// the loading placeholder is replaced by [`ModalBody::Cancelled`];
    /// otherwise the newer invocation owns both and they are left alone.
    #[instrument(skip(self, cancel), name = "show_table_cancellable")]
    pub async fn show_until_cancelled(
        &self,
        endpoint: &str,
        title: &str,
        cancel: CancellationToken,
    ) -> ViewState {
        let generation = self.next_generation();
        self.run_cancellable(generation, endpoint, title, cancel)
            .await
    }

    async fn run_cancellable(
        &self,
        generation: u64,
        endpoint: &str,
        title: &str,
        cancel: CancellationToken,
    ) -> ViewState {
        self.begin(title);

        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => return self.cancelled(generation, title),
            outcome = self.load(endpoint) => outcome,
        };

        if cancel.is_cancelled() {
            return self.cancelled(generation, title);
        }
        self.finish(title, outcome)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn begin(&self, title: &str) {
        *self.lock_state() = ViewState::Loading;
        self.ui.render_modal(title, &ModalBody::Loading);
    }

    fn cancelled(&self, generation: u64, title: &str) -> ViewState {
        let mut state = self.lock_state();
        if self.generation.load(Ordering::Relaxed) == generation {
            info!("view request cancelled");
            *state = ViewState::Idle;
            self.ui.render_modal(title, &ModalBody::Cancelled);
        } else {
            debug!("view request cancelled after a newer one started");
        }
        ViewState::Idle
    }

    fn finish(&self, title: &str, outcome: ApiResult<TableView>) -> ViewState {
        let (state, body) = match outcome {
            Ok(table) => {
                debug!(
                    rows = table.rows().len(),
                    columns = table.columns().len(),
                    "collection rendered"
                );
                (ViewState::Rendered(table.clone()), ModalBody::Table(table))
            }
            Err(err) => {
                warn!("collection failed to load: {err}");
                let message = err.to_string();
                (ViewState::Errored(message.clone()), ModalBody::Error(message))
            }
        };

        self.ui.render_modal(title, &body);
        *self.lock_state() = state.clone();
        state
    }

    async fn load(&self, endpoint: &str) -> ApiResult<TableView> {
        let url = self.config.url(endpoint);
        let body: Value = api_request(&self.transport, Client::get(url)).await?;

        match body {
            Value::Array(records) => Ok(TableView::from_records(&records)),
            other => Err(ApiError::Decode(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            ))),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ViewState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl<T, U> RemoteTableViewer<T, U>
where
    T: HttpTransport + 'static,
    U: UiToolkit + 'static,
{
    /// Run [`RemoteTableViewer::show`] as a background task that can be cancelled.
    pub fn spawn_show(
        self: &Arc<Self>,
        endpoint: impl Into<String>,
        title: impl Into<String>,
    ) -> ViewTask {
        let generation = self.next_generation();
        let cancel = CancellationToken::new();

        let viewer = Arc::clone(self);
        let token = cancel.clone();
        let endpoint = endpoint.into();
        let title = title.into();

        let join = tokio::spawn(async move {
            viewer
                .run_cancellable(generation, &endpoint, &title, token)
                .await
        });

        ViewTask {
            generation,
            cancel,
            join,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Handle to a spawned view request.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct ViewTask {
    generation: u64,
    cancel: CancellationToken,
    join: tokio::task::JoinHandle<ViewState>,
}

#[cfg(not(target_arch = "wasm32"))]
impl ViewTask {
    /// Monotonic per viewer; higher means spawned later.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop the result of this request if it has not been rendered yet.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait for the request to settle.
    pub async fn join(self) -> Result<ViewState, tokio::task::JoinError> {
        self.join.await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::{Notify, oneshot};

    use super::*;
    use crate::http::{HttpError, HttpResult, RequestBuilder, Response};
    use crate::table::EMPTY_PLACEHOLDER;
    use crate::ui::HeadlessUi;

    /// Answers every request with the same canned result.
    struct CannedTransport(HttpResult<(u16, &'static str)>);

    #[async_trait]
    impl HttpTransport for CannedTransport {
        async fn send(&self, _request: RequestBuilder) -> HttpResult<Response> {
            self.0.clone().map(|(status, body)| Response {
                status,
                body: body.as_bytes().to_vec(),
            })
        }
    }

    type Reply = (u16, &'static str);

    /// Per-URL gates: a request waits until the test sends its reply.
    #[derive(Default)]
    struct Gates {
        pending: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
        arrived: Notify,
    }

    impl Gates {
        fn register(&self, url: &str) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.pending.lock().unwrap().insert(url.to_owned(), rx);
            tx
        }
    }

    struct GatedTransport(Arc<Gates>);

    #[async_trait]
    impl HttpTransport for GatedTransport {
        async fn send(&self, request: RequestBuilder) -> HttpResult<Response> {
            let gate = self.0.pending.lock().unwrap().remove(request.url());
            self.0.arrived.notify_one();

            let Some(gate) = gate else {
                return Err(HttpError::new(format!("no gate for {}", request.url())));
            };
            let (status, body) = gate
                .await
                .map_err(|_closed| HttpError::new("gate dropped"))?;
            Ok(Response {
                status,
                body: body.as_bytes().to_vec(),
            })
        }
    }

    fn gated_viewer(gates: &Arc<Gates>) -> Arc<RemoteTableViewer<GatedTransport, HeadlessUi>> {
        Arc::new(RemoteTableViewer::new(
            BusinessConfig::new("http://admin.test"),
            GatedTransport(Arc::clone(gates)),
            HeadlessUi::new(true),
        ))
    }

    fn viewer(result: HttpResult<(u16, &'static str)>) -> RemoteTableViewer<CannedTransport, HeadlessUi> {
        RemoteTableViewer::new(
            BusinessConfig::new("http://admin.test"),
            CannedTransport(result),
            HeadlessUi::new(true),
        )
    }

    #[tokio::test]
    async fn renders_table_after_loading_placeholder() {
        let viewer = viewer(Ok((200, r#"[{"a":1,"b":null},{"a":2,"b":"x"}]"#)));
        assert_eq!(viewer.state(), ViewState::Idle);

        let state = viewer.show("/admin/changes", "Changes").await;

        let ViewState::Rendered(table) = &state else {
            panic!("expected Rendered, got {state:?}");
        };
        assert_eq!(table.columns(), ["a", "b"]);
        assert_eq!(table.rows()[0], ["1", ""]);
        assert_eq!(table.rows()[1], ["2", "x"]);

        let modals = viewer.ui().modals();
        assert_eq!(modals.len(), 2);
        assert_eq!(modals[0], ("Changes".to_owned(), ModalBody::Loading));
        assert!(matches!(modals[1].1, ModalBody::Table(_)));
        assert_eq!(viewer.state(), state);
    }

    #[tokio::test]
    async fn empty_array_renders_placeholder() {
        let viewer = viewer(Ok((200, "[]")));
        let state = viewer.show("/admin/newsletters", "Newsletters").await;

        let Some((_, body)) = viewer.ui().current_modal() else {
            panic!("modal never rendered");
        };
        assert!(matches!(state, ViewState::Rendered(ref t) if t.is_empty()));
        let html = body.to_html();
        assert_eq!(html.matches("<tr>").count(), 1);
        assert!(html.contains(EMPTY_PLACEHOLDER));
    }

    #[tokio::test]
    async fn server_error_message_is_shown_inline() {
        let viewer = viewer(Ok((500, r#"{"error":"boom"}"#)));
        let state = viewer.show("/admin/documents", "Documents").await;

        assert_eq!(state, ViewState::Errored("boom".to_owned()));
        let Some((title, body)) = viewer.ui().current_modal() else {
            panic!("modal never rendered");
        };
        assert_eq!(title, "Documents");
        let html = body.to_html();
        assert!(html.contains("boom"));
        assert!(!html.contains("<table"));
    }

    #[tokio::test]
    async fn transport_failure_is_terminal_not_propagated() {
        let viewer = viewer(Err(HttpError::new("connection refused")));
        let state = viewer.show("/admin/subscribers", "Subscribers").await;

        assert_eq!(state, ViewState::Errored("connection refused".to_owned()));
        assert!(state.is_terminal());
    }

    #[tokio::test]
    async fn non_array_body_is_a_decode_error() {
        let viewer = viewer(Ok((200, r#"{"status":"running"}"#)));
        let state = viewer.show("/api/status", "Status").await;

        assert_eq!(
            state,
            ViewState::Errored("expected a JSON array, got an object".to_owned())
        );
    }

    #[tokio::test]
    async fn malformed_json_is_a_decode_error() {
        let viewer = viewer(Ok((200, "<html>oops</html>")));
        let state = viewer.show("/admin/changes", "Changes").await;

        let ViewState::Errored(message) = state else {
            panic!("expected Errored");
        };
        assert!(message.starts_with("invalid JSON response"));
    }

    #[tokio::test]
    async fn pre_cancelled_request_returns_to_idle() {
        let viewer = viewer(Ok((200, r#"[{"a":1}]"#)));
        let token = CancellationToken::new();
        token.cancel();

        let state = viewer
            .show_until_cancelled("/admin/changes", "Changes", token)
            .await;

        assert_eq!(state, ViewState::Idle);
        assert_eq!(viewer.state(), ViewState::Idle);
        assert_eq!(
            viewer.ui().modals(),
            [
                ("Changes".to_owned(), ModalBody::Loading),
                ("Changes".to_owned(), ModalBody::Cancelled),
            ]
        );
    }

    #[tokio::test]
    async fn cancel_while_in_flight_drops_the_response() {
        let gates = Arc::new(Gates::default());
        let release = gates.register("http://admin.test/admin/changes");
        let viewer = gated_viewer(&gates);

        let task = viewer.spawn_show("/admin/changes", "Changes");
        gates.arrived.notified().await;
        assert_eq!(viewer.state(), ViewState::Loading);

        task.cancel();
        release
            .send((200, r#"[{"a":1}]"#))
            .expect("request is still waiting");
        assert_eq!(task.join().await.expect("task completes"), ViewState::Idle);

        assert_eq!(viewer.state(), ViewState::Idle);
        let modals = viewer.ui().modals();
        assert_eq!(modals.last(), Some(&("Changes".to_owned(), ModalBody::Cancelled)));
        assert!(
            !modals
                .iter()
                .any(|(_, body)| matches!(body, ModalBody::Table(_))),
            "cancelled response must never be rendered"
        );
    }

    #[tokio::test]
    async fn cancelling_a_superseded_request_leaves_the_newer_one_alone() {
        let gates = Arc::new(Gates::default());
        let _old_gate = gates.register("http://admin.test/admin/changes");
        let new_gate = gates.register("http://admin.test/admin/documents");
        let viewer = gated_viewer(&gates);

        let old = viewer.spawn_show("/admin/changes", "Changes");
        gates.arrived.notified().await;
        let new = viewer.spawn_show("/admin/documents", "Documents");
        gates.arrived.notified().await;

        old.cancel();
        assert_eq!(old.join().await.expect("task completes"), ViewState::Idle);
        assert_eq!(viewer.state(), ViewState::Loading);
        assert_eq!(
            viewer.ui().current_modal(),
            Some(("Documents".to_owned(), ModalBody::Loading))
        );

        new_gate
            .send((200, r#"[{"id":7}]"#))
            .expect("request is still waiting");
        let state = new.join().await.expect("task completes");
        assert!(matches!(state, ViewState::Rendered(_)));
        assert_eq!(viewer.state(), state);
    }

    #[tokio::test]
    async fn overlapping_shows_last_response_wins() {
        let gates = Arc::new(Gates::default());
        let first_gate = gates.register("http://admin.test/admin/changes");
        let second_gate = gates.register("http://admin.test/admin/documents");
        let viewer = gated_viewer(&gates);

        let first = viewer.spawn_show("/admin/changes", "Changes");
        let second = viewer.spawn_show("/admin/documents", "Documents");

        // resolve in reverse order
        second_gate
            .send((200, r#"[{"doc":"b"}]"#))
            .expect("request is still waiting");
        let second_state = second.join().await.expect("task completes");
        assert!(matches!(second_state, ViewState::Rendered(_)));

        first_gate
            .send((200, r#"[{"change":"a"}]"#))
            .expect("request is still waiting");
        let first_state = first.join().await.expect("task completes");

        let Some((title, ModalBody::Table(table))) = viewer.ui().current_modal() else {
            panic!("modal does not show a table");
        };
        assert_eq!(title, "Changes");
        assert_eq!(table.columns(), ["change"]);
        assert_eq!(viewer.state(), first_state);
    }

    #[tokio::test]
    async fn spawned_tasks_have_increasing_generations() {
        let viewer = Arc::new(viewer(Ok((200, "[]"))));

        let first = viewer.spawn_show("/admin/changes", "Changes");
        let second = viewer.spawn_show("/admin/changes", "Changes");
        assert!(second.generation() > first.generation());

        assert!(matches!(first.join().await, Ok(ViewState::Rendered(_))));
        assert!(matches!(second.join().await, Ok(ViewState::Rendered(_))));
    }
}
