//! Maps button presses to player actions.
//!
//! The controller is the only reader of `was_pressed` for bound
//! channels: each bound channel's pressed flag is taken exactly once
//! per poll, and every binding on that channel receives the press.

use heapless::Vec;

use crate::config::MAX_CHANNELS;
use crate::input::{ChannelRegistry, InputSource};
use crate::player::{FrameSink, Mp3Player};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    TogglePlayPause,
    Stop,
}

/// One channel → (player, action) mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Binding {
    pub channel: usize,
    pub player: usize,
    pub action: Action,
}

/// An action for a specific player, produced by a press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request {
    pub player: usize,
    pub action: Action,
}

/// Board layout: left column drives player 0, right column player 1.
pub const DEFAULT_BINDINGS: [Binding; 4] = [
    Binding { channel: 0, player: 0, action: Action::TogglePlayPause },
    Binding { channel: 1, player: 1, action: Action::TogglePlayPause },
    Binding { channel: 2, player: 0, action: Action::Stop },
    Binding { channel: 3, player: 1, action: Action::Stop },
];

pub struct AudioController<'a> {
    bindings: &'a [Binding],
}

impl<'a> AudioController<'a> {
    pub const fn new(bindings: &'a [Binding]) -> Self {
        Self { bindings }
    }

    /// Consume pressed events of bound channels and return the
    /// resulting requests in binding order.
    pub fn poll<S: InputSource, const N: usize>(
        &self,
        registry: &mut ChannelRegistry<S, N>,
    ) -> Vec<Request, MAX_CHANNELS> {
        let mut pressed = [false; MAX_CHANNELS];
        for (channel, hit) in pressed.iter_mut().enumerate().take(registry.count()) {
            if self.bindings.iter().any(|b| b.channel == channel) {
                *hit = registry.was_pressed(channel);
            }
        }

        let mut requests = Vec::new();
        for binding in self.bindings {
            if pressed.get(binding.channel).copied().unwrap_or(false) {
                // Full only when bindings outnumber MAX_CHANNELS.
                let _ = requests.push(Request {
                    player: binding.player,
                    action: binding.action,
                });
            }
        }
        requests
    }
}

/// Run one action against a player.
pub fn apply<T: FrameSink>(player: &mut Mp3Player<T>, action: Action) -> Result<(), T::Error> {
    match action {
        Action::TogglePlayPause => player.toggle_play_pause(),
        Action::Stop => player.stop(),
    }
}
