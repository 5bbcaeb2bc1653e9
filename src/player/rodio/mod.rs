use std::fmt::Formatter;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering},
    Arc, Mutex,
};
use std::{fmt, thread, time::Duration};

use anyhow::Context;
use rodio::source::Stoppable;
use rodio::{OutputStream, Sink, Source};

use super::{PlaybackStatus, Player};

mod source;

#[derive(Debug, Default)]
struct Shared {
    stop: AtomicBool,
    status: AtomicU8,
    // Monotonic id of the latest `load`. A loader whose id is older has
    // been superseded and must drop its stream instead of appending it.
    generation: AtomicU64,
    // Every generation check and every status or sink mutation happens
    // under this lock, so at most one stream ever sits in the sink.
    gate: Mutex<()>,
}

pub struct RodioPlayer {
    sink: Arc<Sink>,
    shared: Arc<Shared>,
    // The stream owns the output device and must outlive the sink.
    _stream: OutputStream,
}

impl RodioPlayer {
    const ACCESS_PERIOD: Duration = Duration::from_millis(15);

    pub fn try_default() -> anyhow::Result<Self> {
        let (stream, handle) = OutputStream::try_default().context("open default output")?;
        let sink = Sink::try_new(&handle).context("create sink")?;

        Ok(Self {
            sink: Arc::new(sink),
            shared: Arc::default(),
            _stream: stream,
        })
    }

    fn load_stream(
        sink: &Sink,
        shared: &Arc<Shared>,
        generation: u64,
        url: &str,
    ) -> anyhow::Result<()> {
        let source = source::Symphonia::from_http(url)?;

        let controls = shared.clone();

        let access = move |src: &mut Stoppable<_>| {
            if controls.stop.load(Ordering::SeqCst) {
                src.stop();
                controls.stop.store(false, Ordering::SeqCst);
            } else {
                // Runs only while the mixer pulls samples, so this is the
                // signal that audio is actually flowing.
                controls
                    .status
                    .store(PlaybackStatus::Playing.code(), Ordering::SeqCst);
            }
        };

        let source = source
            .stoppable()
            .periodic_access(Self::ACCESS_PERIOD, access);

        let _gate = shared.gate.lock().unwrap();

        if shared.generation.load(Ordering::SeqCst) != generation {
            log::debug!("drop superseded stream {}", url);
            return Ok(());
        }

        shared
            .status
            .store(PlaybackStatus::Loaded.code(), Ordering::SeqCst);

        sink.append(source);
        // A fresh stream always starts audible, even if the previous one
        // was paused.
        sink.play();

        Ok(())
    }
}

impl Player for RodioPlayer {
    fn load(&self, stream_url: &str) -> anyhow::Result<()> {
        self.unload();

        let generation = {
            let _gate = self.shared.gate.lock().unwrap();
            let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            self.shared
                .status
                .store(PlaybackStatus::Buffering.code(), Ordering::SeqCst);
            generation
        };

        let sink = self.sink.clone();
        let shared = self.shared.clone();
        let url = stream_url.to_string();

        // Connecting and probing can take seconds, so it happens off the
        // caller's thread. The generation check keeps a slow loader from
        // resurrecting a stream nobody wants anymore.
        thread::Builder::new()
            .name("stream-loader".to_string())
            .spawn(move || {
                if let Err(err) = Self::load_stream(&sink, &shared, generation, &url) {
                    log::error!("load stream {} failed: {}", url, err);

                    let _gate = shared.gate.lock().unwrap();
                    if shared.generation.load(Ordering::SeqCst) == generation {
                        shared
                            .status
                            .store(PlaybackStatus::Idle.code(), Ordering::SeqCst);
                    }
                }
            })
            .context("spawn stream loader")?;

        Ok(())
    }

    fn pause(&self) {
        self.sink.pause();
    }

    fn resume(&self) {
        self.sink.play();
    }

    fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    fn unload(&self) {
        let _gate = self.shared.gate.lock().unwrap();

        self.shared.generation.fetch_add(1, Ordering::SeqCst);

        // A paused sink pulls no samples and would never see the stop
        // flag, so resume before draining.
        self.sink.play();

        while self.sink.len() > 0 {
            self.shared.stop.store(true, Ordering::SeqCst);
            self.sink.sleep_until_end();
        }

        self.shared.stop.store(false, Ordering::SeqCst);
        self.shared
            .status
            .store(PlaybackStatus::Idle.code(), Ordering::SeqCst);
    }

    fn status(&self) -> PlaybackStatus {
        let status = PlaybackStatus::from_code(self.shared.status.load(Ordering::SeqCst));

        // A stream that ran out leaves the sink empty while the last
        // access tick still says playing.
        if status == PlaybackStatus::Playing && self.sink.empty() {
            return PlaybackStatus::Idle;
        }

        status
    }
}

impl fmt::Debug for RodioPlayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RodioPlayer")
            .field("shared", &self.shared)
            .finish()
    }
}
