//! Monotonic millisecond clock shared by every cooldown in the game.

use bevy::prelude::*;

/// Source of monotonic timestamps, in milliseconds.
///
/// Cooldowns (attack cooldown, invincibility windows) are polled against this
/// clock once per tick, so their resolution is bounded by the frame rate.
pub trait ClockSource {
    /// Current timestamp. Never decreases between calls.
    fn now(&self) -> u64;
}

/// Frame-locked game clock.
///
/// Follows Bevy's virtual time, so it stops while the game is paused.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameClock {
    now_ms: u64,
}

impl GameClock {
    /// Clock frozen at the given timestamp.
    pub fn at(now_ms: u64) -> Self {
        Self { now_ms }
    }

    /// Move the clock to `now_ms`. Earlier timestamps are ignored.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Move the clock forward by `delta_ms`.
    pub fn advance_by(&mut self, delta_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
    }
}

impl ClockSource for GameClock {
    fn now(&self) -> u64 {
        self.now_ms
    }
}

/// Copy elapsed virtual time into the game clock, once per frame.
pub fn tick_game_clock(time: Res<Time>, mut clock: ResMut<GameClock>) {
    let elapsed = u64::try_from(time.elapsed().as_millis()).unwrap_or(u64::MAX);
    clock.advance_to(elapsed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_never_runs_backwards() {
        let mut clock = GameClock::at(1_000);
        clock.advance_to(400);
        assert_eq!(clock.now(), 1_000);

        clock.advance_to(1_250);
        clock.advance_by(50);
        assert_eq!(clock.now(), 1_300);
    }
}
