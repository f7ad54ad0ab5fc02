//! Audio requests
//!
//! The simulation only names the sound; playback belongs to the host.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Background loop, restarted after a lost ball
    Ambient,
    /// Ball hits paddle
    PaddleHit,
    /// Ball breaks a brick
    BrickHit,
    /// Last brick destroyed
    Win,
    /// Ball lost to the respawn zone
    Lose,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Ambient => "ambient",
            SoundEffect::PaddleHit => "paddle_hit",
            SoundEffect::BrickHit => "brick_hit",
            SoundEffect::Win => "win",
            SoundEffect::Lose => "lose",
        }
    }
}

/// Fire-and-forget audio output
pub trait AudioSink {
    /// Start (or restart) a clip
    fn play(&mut self, effect: SoundEffect);
    /// Stop a clip if it is playing
    fn stop(&mut self, effect: SoundEffect);
}
