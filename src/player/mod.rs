pub use self::rodio::RodioPlayer;

mod rodio;

/// Stages a stream goes through between selection and audible output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Idle,
    Buffering,
    Loaded,
    Playing,
}

impl PlaybackStatus {
    fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Buffering,
            2 => Self::Loaded,
            3 => Self::Playing,
            _ => Self::Idle,
        }
    }

    fn code(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Buffering => 1,
            Self::Loaded => 2,
            Self::Playing => 3,
        }
    }
}

pub trait Player {
    /// Starts fetching the given stream and plays it as soon as enough of
    /// it is decoded. Any previous stream is dropped first.
    fn load(&self, stream_url: &str) -> anyhow::Result<()>;

    /// Pauses the current stream. No effect if already paused.
    fn pause(&self);

    /// Resumes a paused stream. No effect if not paused.
    fn resume(&self);

    /// Gets if a player is paused.
    fn is_paused(&self) -> bool;

    /// Stops and drops the current stream, if any. Also cancels a stream
    /// that is still being fetched.
    fn unload(&self);

    /// Current playback stage.
    fn status(&self) -> PlaybackStatus;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for status in [
            PlaybackStatus::Idle,
            PlaybackStatus::Buffering,
            PlaybackStatus::Loaded,
            PlaybackStatus::Playing,
        ] {
            assert_eq!(PlaybackStatus::from_code(status.code()), status);
        }
    }

    #[test]
    fn unknown_status_code_is_idle() {
        assert_eq!(PlaybackStatus::from_code(42), PlaybackStatus::Idle);
    }
}
