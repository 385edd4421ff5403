//! Sprite animation state machine.
//!
//! An [`Animator`] owns a [`FrameRegistry`] (state name → frame sequence) and
//! three states: the one shown now, the one shown before it, and the one most
//! recently requested. Requests are cheap and can be made every physics tick;
//! only the last request before an animator tick is considered.
//!
//! The animator ticks on its own [`AnimatorClock`], gated by a wall-clock
//! cooldown, so animation speed does not depend on the physics frame rate.
//! On each tick it decides whether the requested state may replace the
//! current one:
//!
//! - a non-holding state is always replaced;
//! - a holding state resists replacement while its hold count runs down,
//!   unless it is interruptible and the requested name is whitelisted.
//!
//! The exact rule for an expiring hold is selected by [`HoldPolicy`].
//!
//! State names are open-ended strings, but every request is validated against
//! the registry so a typo fails at request time instead of at draw time.

use std::str::FromStr;

use log::{debug, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::components::sprite::SpriteFrame;
use crate::error::ConfigError;

/// How a holding state decides that its hold is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldPolicy {
    /// The hold blocks while `frames_remaining > 0` and releases at 0.
    #[default]
    Countdown,
    /// A holding state is replaced while `frames_remaining > 0`; once the
    /// count reaches 0 only a whitelisted interrupt can replace it.
    Legacy,
}

impl FromStr for HoldPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "countdown" => Ok(HoldPolicy::Countdown),
            "legacy" => Ok(HoldPolicy::Legacy),
            other => Err(ConfigError::InvalidValue {
                key: "animation.hold_policy".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// A requested or active animation state.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    pub name: String,
    pub start_frame: usize,
    pub current_frame: usize,
    /// Pin the display to `start_frame` and resist replacement.
    pub hold: bool,
    /// Animator ticks left in the hold.
    pub frames_remaining: u32,
    pub interruptible: bool,
    pub interrupt_whitelist: SmallVec<[String; 2]>,
}

impl AnimationState {
    /// A plain looping state starting at `start_frame`.
    pub fn new(name: impl Into<String>, start_frame: usize) -> Self {
        Self {
            name: name.into(),
            start_frame,
            current_frame: start_frame,
            hold: false,
            frames_remaining: 0,
            interruptible: false,
            interrupt_whitelist: SmallVec::new(),
        }
    }

    /// Hold on `start_frame` for `num_frames` animator ticks.
    pub fn with_hold(mut self, num_frames: u32) -> Self {
        self.hold = true;
        self.frames_remaining = num_frames;
        self
    }

    /// Allow the listed states to cut the hold short.
    pub fn interruptible_by<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interruptible = true;
        self.interrupt_whitelist = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn can_be_interrupted_by(&self, name: &str) -> bool {
        self.interruptible && self.interrupt_whitelist.iter().any(|n| n == name)
    }
}

/// State name → ordered frame sequence. Filled once at setup.
#[derive(Debug, Clone, Default)]
pub struct FrameRegistry {
    sequences: FxHashMap<String, Vec<SpriteFrame>>,
}

impl FrameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `frames` under `name`. The last registration for a name wins.
    pub fn init_state(
        &mut self,
        name: impl Into<String>,
        frames: Vec<SpriteFrame>,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        if frames.is_empty() {
            return Err(ConfigError::EmptySequence(name));
        }
        if let Some(old) = self.sequences.get(&name) {
            if old.len() != frames.len() {
                warn!(
                    "Animation state '{}' re-registered with {} frames (was {})",
                    name,
                    frames.len(),
                    old.len()
                );
            }
        }
        self.sequences.insert(name, frames);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&[SpriteFrame]> {
        self.sequences.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    /// Number of frames registered for `name`, 0 if unknown.
    pub fn frame_count(&self, name: &str) -> usize {
        self.sequences.get(name).map_or(0, Vec::len)
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(ConfigError::UnknownState(name.to_string()))
        }
    }
}

/// Wall-clock gate for animator ticks. Times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorClock {
    pub cooldown: f32,
    pub last_update: f32,
}

impl AnimatorClock {
    pub fn new(cooldown: f32) -> Self {
        Self {
            cooldown,
            last_update: 0.0,
        }
    }

    /// True (and restarts the cooldown) when at least `cooldown` has passed.
    pub fn ready(&mut self, now: f32) -> bool {
        if now - self.last_update < self.cooldown {
            return false;
        }
        self.last_update = now;
        true
    }
}

#[derive(Debug, Clone)]
pub struct Animator {
    registry: FrameRegistry,
    clock: AnimatorClock,
    policy: HoldPolicy,
    last_state: AnimationState,
    current_state: AnimationState,
    requested_state: Option<AnimationState>,
}

impl Animator {
    /// Build an animator showing `initial`, which must be registered.
    pub fn new(
        registry: FrameRegistry,
        cooldown: f32,
        initial: AnimationState,
    ) -> Result<Self, ConfigError> {
        registry.validate(&initial.name)?;
        Ok(Self {
            registry,
            clock: AnimatorClock::new(cooldown),
            policy: HoldPolicy::default(),
            last_state: initial.clone(),
            current_state: initial,
            requested_state: None,
        })
    }

    pub fn with_policy(mut self, policy: HoldPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn init_state(
        &mut self,
        name: impl Into<String>,
        frames: Vec<SpriteFrame>,
    ) -> Result<(), ConfigError> {
        self.registry.init_state(name, frames)
    }

    /// Record the state to switch to on the next tick, replacing any earlier
    /// pending request.
    pub fn request_state(&mut self, state: AnimationState) -> Result<(), ConfigError> {
        self.registry.validate(&state.name)?;
        self.requested_state = Some(state);
        Ok(())
    }

    /// Advance the animation if the cooldown has elapsed at wall-clock `now`.
    ///
    /// Returns whether a tick happened. A tick first resolves the pending
    /// request, then steps the (possibly new) current state by one frame.
    pub fn tick(&mut self, now: f32) -> bool {
        if !self.clock.ready(now) {
            return false;
        }
        self.switch_states();
        self.advance_frame();
        true
    }

    fn switch_states(&mut self) {
        let Some(requested) = self.requested_state.as_ref() else {
            return;
        };
        let current = &self.current_state;
        let promote = if !current.hold {
            true
        } else {
            match self.policy {
                HoldPolicy::Countdown => {
                    current.frames_remaining == 0
                        || current.can_be_interrupted_by(&requested.name)
                }
                HoldPolicy::Legacy => {
                    current.frames_remaining > 0
                        || current.can_be_interrupted_by(&requested.name)
                }
            }
        };
        if !promote {
            return;
        }
        if let Some(mut next) = self.requested_state.take() {
            // re-requesting a looping state continues its cycle
            if !next.hold && next.name == self.current_state.name {
                next.current_frame = self.current_state.current_frame;
            } else {
                debug!(
                    "Animation state {} -> {}",
                    self.current_state.name, next.name
                );
            }
            self.last_state = std::mem::replace(&mut self.current_state, next);
        }
    }

    fn advance_frame(&mut self) {
        let frame_count = self.registry.frame_count(&self.current_state.name);
        let state = &mut self.current_state;
        state.current_frame += 1;
        if state.hold {
            state.frames_remaining = state.frames_remaining.saturating_sub(1);
            state.current_frame = state.start_frame;
        }
        if state.current_frame >= frame_count {
            state.current_frame = 0;
        }
    }

    /// Frame to draw for the current state. An out-of-range index falls back
    /// to the first frame.
    pub fn get_frame(&self) -> Result<&SpriteFrame, ConfigError> {
        let name = &self.current_state.name;
        let frames = self
            .registry
            .get(name)
            .ok_or_else(|| ConfigError::UnknownState(name.clone()))?;
        frames
            .get(self.current_state.current_frame)
            .or_else(|| frames.first())
            .ok_or_else(|| ConfigError::EmptySequence(name.clone()))
    }

    pub fn current_state(&self) -> &AnimationState {
        &self.current_state
    }

    pub fn last_state(&self) -> &AnimationState {
        &self.last_state
    }

    pub fn requested_state(&self) -> Option<&AnimationState> {
        self.requested_state.as_ref()
    }

    pub fn registry(&self) -> &FrameRegistry {
        &self.registry
    }

    pub fn clock(&self) -> &AnimatorClock {
        &self.clock
    }
}
