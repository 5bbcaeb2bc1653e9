use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::Client;
use crate::models::{SearchQuery, Station};
use crate::player::{PlaybackStatus, Player};

const LOAD_STATIONS_ERROR: &str = "Could not load radio stations.";
const INVALID_STATION_ERROR: &str = "Invalid station!";

struct SearchOutcome {
    seq: u64,
    result: anyhow::Result<Vec<Station>>,
}

pub struct App {
    player: Box<dyn Player>,
    client: Arc<dyn Client>,
    country_code: Option<String>,

    stations: Vec<Station>,
    current: Option<Station>,
    loading: bool,
    error: Option<String>,

    // Id of the newest search. Responses carrying an older id lost the
    // race and are dropped, whatever order they arrive in.
    search_seq: u64,
    outcome_tx: mpsc::UnboundedSender<SearchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SearchOutcome>,

    last_status: PlaybackStatus,
}

impl App {
    pub fn new(
        player: Box<dyn Player>,
        client: Arc<dyn Client>,
        country_code: Option<String>,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Self {
            player,
            client,
            country_code,
            stations: vec![],
            current: None,
            loading: false,
            error: None,
            search_seq: 0,
            outcome_tx,
            outcome_rx,
            last_status: PlaybackStatus::Idle,
        }
    }

    /// Kicks off a directory search for the given term. The result is
    /// applied by `tick` once it arrives.
    pub fn search(&mut self, term: &str) {
        self.search_seq += 1;
        self.loading = true;

        let seq = self.search_seq;
        let query = SearchQuery {
            name: Some(term.to_string()).filter(|t| !t.is_empty()),
            country_code: self.country_code.clone(),
            ..SearchQuery::default()
        };

        let client = self.client.clone();
        let tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let result = client.search(&query).await;
            // a closed channel only means the ui is already gone.
            let _ = tx.send(SearchOutcome { seq, result });
        });
    }

    /// Applies finished searches and watches the stream state. Runs once
    /// per ui tick.
    pub fn tick(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            if outcome.seq != self.search_seq {
                continue;
            }

            self.loading = false;

            match outcome.result {
                Ok(stations) => {
                    self.error = None;
                    self.stations = stations;
                }
                Err(e) => {
                    log::error!("search stations failed: {}", e);
                    self.error = Some(LOAD_STATIONS_ERROR.to_string());
                }
            }
        }

        let status = self.player.status();

        // Falling back to idle straight from buffering means the stream
        // could not be opened.
        if self.current.is_some()
            && self.last_status == PlaybackStatus::Buffering
            && status == PlaybackStatus::Idle
        {
            self.error = Some(INVALID_STATION_ERROR.to_string());
        }

        self.last_status = status;
    }

    /// Tunes in the given station. A station listed without a stream url
    /// is rejected up front, before the current stream is touched.
    pub fn select_station(&mut self, station: &Station) {
        self.error = None;

        if station.url_resolved.trim().is_empty() {
            log::error!("station {} has no stream url", station.uuid);
            self.error = Some(INVALID_STATION_ERROR.to_string());
            return;
        }

        match self.player.load(&station.url_resolved) {
            Ok(()) => {
                self.current = Some(station.clone());
                self.last_status = self.player.status();
            }
            Err(e) => {
                log::error!("load station {} failed: {}", station.uuid, e);
                self.current = None;
                self.error = Some(INVALID_STATION_ERROR.to_string());
            }
        }
    }

    /// Pauses or resumes the current stream. Does nothing while no
    /// station is tuned in.
    pub fn toggle_play_pause(&mut self) {
        if self.current.is_none() {
            return;
        }

        if self.player.is_paused() {
            self.player.resume();
        } else {
            self.player.pause();
        }
    }

    /// Drops the stream and the tuned station. Used on shutdown.
    pub fn release(&mut self) {
        self.player.unload();
        self.current = None;
        self.last_status = PlaybackStatus::Idle;
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn current(&self) -> Option<&Station> {
        self.current.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_paused(&self) -> bool {
        self.player.is_paused()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.player.status()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use futures::future::BoxFuture;

    use super::*;

    fn station(uuid: &str, name: &str, url: &str) -> Station {
        Station {
            uuid: uuid.to_string(),
            name: name.to_string(),
            url_resolved: url.to_string(),
            country: "MM".to_string(),
            language: "Burmese".to_string(),
            clickcount: 5,
            votes: 10,
        }
    }

    fn cherry_fm() -> Station {
        station("1", "Cherry FM", "https://x/stream")
    }

    #[derive(Debug)]
    struct FakeState {
        calls: Mutex<Vec<String>>,
        paused: AtomicBool,
        status: Mutex<PlaybackStatus>,
        fail_load: AtomicBool,
    }

    impl Default for FakeState {
        fn default() -> Self {
            Self {
                calls: Mutex::new(vec![]),
                paused: AtomicBool::new(false),
                status: Mutex::new(PlaybackStatus::Idle),
                fail_load: AtomicBool::new(false),
            }
        }
    }

    impl FakeState {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn set_status(&self, status: PlaybackStatus) {
            *self.status.lock().unwrap() = status;
        }
    }

    struct FakePlayer(Arc<FakeState>);

    impl Player for FakePlayer {
        fn load(&self, stream_url: &str) -> anyhow::Result<()> {
            self.0.calls.lock().unwrap().push(format!("load {stream_url}"));

            if self.0.fail_load.load(Ordering::SeqCst) {
                anyhow::bail!("no output device");
            }

            self.0.paused.store(false, Ordering::SeqCst);
            self.0.set_status(PlaybackStatus::Buffering);

            Ok(())
        }

        fn pause(&self) {
            self.0.calls.lock().unwrap().push("pause".to_string());
            self.0.paused.store(true, Ordering::SeqCst);
        }

        fn resume(&self) {
            self.0.calls.lock().unwrap().push("resume".to_string());
            self.0.paused.store(false, Ordering::SeqCst);
        }

        fn is_paused(&self) -> bool {
            self.0.paused.load(Ordering::SeqCst)
        }

        fn unload(&self) {
            self.0.calls.lock().unwrap().push("unload".to_string());
            self.0.set_status(PlaybackStatus::Idle);
        }

        fn status(&self) -> PlaybackStatus {
            *self.0.status.lock().unwrap()
        }
    }

    // Returns one station named after the search term, or fails for the
    // term "bad".
    struct KeyedClient;

    impl Client for KeyedClient {
        fn search(&self, query: &SearchQuery) -> BoxFuture<anyhow::Result<Vec<Station>>> {
            let term = query.name.clone().unwrap_or_default();

            Box::pin(async move {
                if term == "bad" {
                    anyhow::bail!("boom");
                }

                Ok(vec![station(&term, &term, "https://x/stream")])
            })
        }
    }

    #[derive(Default)]
    struct RecordingClient {
        queries: Mutex<Vec<SearchQuery>>,
    }

    impl Client for RecordingClient {
        fn search(&self, query: &SearchQuery) -> BoxFuture<anyhow::Result<Vec<Station>>> {
            self.queries.lock().unwrap().push(query.clone());

            Box::pin(async { Ok(vec![]) })
        }
    }

    struct PendingClient;

    impl Client for PendingClient {
        fn search(&self, _: &SearchQuery) -> BoxFuture<anyhow::Result<Vec<Station>>> {
            Box::pin(futures::future::pending())
        }
    }

    fn app_with(client: Arc<dyn Client>, country_code: Option<&str>) -> (App, Arc<FakeState>) {
        let state = Arc::new(FakeState::default());
        let player = FakePlayer(state.clone());
        let app = App::new(
            Box::new(player),
            client,
            country_code.map(str::to_string),
        );

        (app, state)
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn search_sends_term_and_country() {
        let client = Arc::new(RecordingClient::default());
        let (mut app, _) = app_with(client.clone(), Some("MM"));

        app.search("cherry");
        settle().await;

        let queries = client.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].name.as_deref(), Some("cherry"));
        assert_eq!(queries[0].country_code.as_deref(), Some("MM"));
        assert_eq!(queries[0].limit, 10);
    }

    #[tokio::test]
    async fn empty_term_searches_without_name() {
        let client = Arc::new(RecordingClient::default());
        let (mut app, _) = app_with(client.clone(), None);

        app.search("");
        settle().await;

        let queries = client.queries.lock().unwrap();
        assert_eq!(queries[0].name, None);
        assert_eq!(queries[0].country_code, None);
    }

    #[tokio::test]
    async fn only_latest_search_is_applied() {
        let (mut app, _) = app_with(Arc::new(KeyedClient), None);

        app.search("first");
        app.search("second");
        settle().await;
        app.tick();

        assert!(!app.is_loading());
        assert_eq!(app.stations().len(), 1);
        assert_eq!(app.stations()[0].name, "second");
    }

    #[tokio::test]
    async fn failed_search_keeps_stations_and_sets_error() {
        let (mut app, _) = app_with(Arc::new(KeyedClient), None);

        app.search("good");
        settle().await;
        app.tick();
        assert_eq!(app.stations()[0].name, "good");

        app.search("bad");
        settle().await;
        app.tick();

        assert_eq!(app.error(), Some("Could not load radio stations."));
        assert_eq!(app.stations()[0].name, "good");
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn search_in_flight_reports_loading() {
        let (mut app, _) = app_with(Arc::new(PendingClient), None);

        app.search("");
        settle().await;
        app.tick();

        assert!(app.is_loading());
        assert!(app.stations().is_empty());
    }

    #[test]
    fn select_station_loads_stream() {
        let (mut app, state) = app_with(Arc::new(KeyedClient), None);

        app.select_station(&cherry_fm());

        assert_eq!(state.calls(), vec!["load https://x/stream"]);
        assert_eq!(app.current().map(|s| s.name.as_str()), Some("Cherry FM"));
        assert_eq!(app.error(), None);
        assert_eq!(app.status(), PlaybackStatus::Buffering);
    }

    #[test]
    fn station_without_url_is_rejected() {
        let (mut app, state) = app_with(Arc::new(KeyedClient), None);

        app.select_station(&station("2", "Dead Air", ""));

        assert!(state.calls().is_empty());
        assert!(app.current().is_none());
        assert_eq!(app.error(), Some("Invalid station!"));
    }

    #[test]
    fn rejected_station_leaves_current_stream_alone() {
        let (mut app, state) = app_with(Arc::new(KeyedClient), None);

        app.select_station(&cherry_fm());
        app.select_station(&station("2", "Dead Air", "  "));

        // the playing station stays tuned in, untouched.
        assert_eq!(state.calls(), vec!["load https://x/stream"]);
        assert_eq!(app.current().map(|s| s.name.as_str()), Some("Cherry FM"));
        assert_eq!(app.error(), Some("Invalid station!"));
    }

    #[test]
    fn selecting_new_station_replaces_stream() {
        let (mut app, state) = app_with(Arc::new(KeyedClient), None);

        app.select_station(&cherry_fm());
        app.select_station(&station("2", "Padauk Radio", "https://x/padauk"));

        assert_eq!(
            state.calls(),
            vec!["load https://x/stream", "load https://x/padauk"]
        );
        assert_eq!(app.current().map(|s| s.uuid.as_str()), Some("2"));
    }

    #[test]
    fn failed_load_reports_invalid_station() {
        let (mut app, state) = app_with(Arc::new(KeyedClient), None);
        state.fail_load.store(true, Ordering::SeqCst);

        app.select_station(&cherry_fm());

        assert!(app.current().is_none());
        assert_eq!(app.error(), Some("Invalid station!"));
    }

    #[test]
    fn failed_stream_reports_invalid_station() {
        let (mut app, state) = app_with(Arc::new(KeyedClient), None);

        app.select_station(&cherry_fm());
        // the loader gave up before anything was decoded.
        state.set_status(PlaybackStatus::Idle);
        app.tick();

        assert_eq!(app.error(), Some("Invalid station!"));
    }

    #[test]
    fn toggle_without_station_is_noop() {
        let (mut app, state) = app_with(Arc::new(KeyedClient), None);

        app.toggle_play_pause();

        assert!(state.calls().is_empty());
    }

    #[test]
    fn toggle_pauses_and_resumes_without_reloading() {
        let (mut app, state) = app_with(Arc::new(KeyedClient), None);

        app.select_station(&cherry_fm());
        app.toggle_play_pause();
        assert!(app.is_paused());

        app.toggle_play_pause();
        assert!(!app.is_paused());

        assert_eq!(
            state.calls(),
            vec!["load https://x/stream", "pause", "resume"]
        );
    }

    #[test]
    fn release_drops_stream_and_station() {
        let (mut app, state) = app_with(Arc::new(KeyedClient), None);

        app.select_station(&cherry_fm());
        app.release();

        assert_eq!(state.calls(), vec!["load https://x/stream", "unload"]);
        assert!(app.current().is_none());
        assert_eq!(app.status(), PlaybackStatus::Idle);
    }
}
