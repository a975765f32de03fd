use std::time::Duration;

/// Arrow-key seek distance.
pub const SEEK_STEP: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Paused,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekDirection {
    Forward,
    Back,
}

/// Transport state for one clip. The terminal never decodes the media; the
/// position advances on the UI tick while playing and can be handed to an
/// external player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoPlayer {
    src: Option<String>,
    status: PlaybackStatus,
    position: Duration,
}

impl VideoPlayer {
    /// Swap the source. A new source always starts paused at 0:00.
    pub fn load(&mut self, src: impl Into<String>) {
        self.src = Some(src.into());
        self.status = PlaybackStatus::Paused;
        self.position = Duration::ZERO;
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn toggle(&mut self) {
        if self.src.is_none() {
            return;
        }
        self.status = match self.status {
            PlaybackStatus::Paused => PlaybackStatus::Playing,
            PlaybackStatus::Playing => PlaybackStatus::Paused,
        };
    }

    pub fn seek(&mut self, direction: SeekDirection) {
        self.position = match direction {
            SeekDirection::Forward => self.position + SEEK_STEP,
            SeekDirection::Back => self.position.saturating_sub(SEEK_STEP),
        };
    }

    /// Advance the clock if playing. Returns whether anything changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.position += elapsed;
        true
    }

    /// `m:ss`
    pub fn timestamp(&self) -> String {
        let secs = self.position.as_secs();
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_resets_transport() {
        let mut player = VideoPlayer::default();
        player.load("a.mp4");
        player.toggle();
        player.advance(Duration::from_secs(42));
        player.load("b.mp4");
        assert_eq!(player.src(), Some("b.mp4"));
        assert_eq!(player.status(), PlaybackStatus::Paused);
        assert_eq!(player.position(), Duration::ZERO);
    }

    #[test]
    fn toggle_needs_a_source() {
        let mut player = VideoPlayer::default();
        player.toggle();
        assert!(!player.is_playing());
        player.load("a.mp4");
        player.toggle();
        assert!(player.is_playing());
    }

    #[test]
    fn seeking_back_stops_at_zero() {
        let mut player = VideoPlayer::default();
        player.load("a.mp4");
        player.seek(SeekDirection::Forward);
        player.seek(SeekDirection::Forward);
        assert_eq!(player.timestamp(), "0:20");
        player.seek(SeekDirection::Back);
        player.seek(SeekDirection::Back);
        player.seek(SeekDirection::Back);
        assert_eq!(player.position(), Duration::ZERO);
    }

    #[test]
    fn paused_players_do_not_advance() {
        let mut player = VideoPlayer::default();
        player.load("a.mp4");
        assert!(!player.advance(Duration::from_secs(1)));
        player.toggle();
        assert!(player.advance(Duration::from_secs(75)));
        assert_eq!(player.timestamp(), "1:15");
    }
}
