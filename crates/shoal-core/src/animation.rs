//! Minimal clip playback: enough of an animation mixer to drive a fish's
//! one-shot burst and its swim loop. The host renderer samples its own skinned
//! clips at the times reported here.

use smallvec::SmallVec;

/// Clip metadata supplied by the asset provider. `duration` is in clip time.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Repeat,
}

/// Playback state of one clip.
#[derive(Clone, Debug)]
pub struct ClipAction {
    clip: AnimationClip,
    pub time: f32,
    pub time_scale: f32,
    pub loop_mode: LoopMode,
    pub clamp_when_finished: bool,
    pub paused: bool,
    playing: bool,
}

impl ClipAction {
    pub fn new(clip: AnimationClip, loop_mode: LoopMode) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            loop_mode,
            clamp_when_finished: false,
            paused: false,
            playing: false,
        }
    }

    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    /// Activate the action. Already playing actions are left untouched.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Deactivate and rewind.
    pub fn stop(&mut self) {
        self.playing = false;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
        self.paused = false;
    }

    /// Stretch the clip so one pass lasts `duration` units of mixer time.
    pub fn set_duration(&mut self, duration: f32) {
        if duration > 0.0 {
            self.time_scale = self.clip.duration / duration;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_running(&self) -> bool {
        self.playing && !self.paused && self.time_scale != 0.0
    }

    fn advance(&mut self, dt: f32) {
        if !self.is_running() {
            return;
        }
        let duration = self.clip.duration;
        self.time += dt * self.time_scale;
        match self.loop_mode {
            LoopMode::Repeat => {
                if duration > 0.0 {
                    self.time = self.time.rem_euclid(duration);
                }
            }
            LoopMode::Once => {
                if self.time >= duration || self.time < 0.0 {
                    if self.clamp_when_finished {
                        self.time = self.time.clamp(0.0, duration);
                        self.paused = true;
                    } else {
                        self.stop();
                    }
                }
            }
        }
    }
}

/// Index of an action inside its mixer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionId(usize);

#[derive(Clone, Debug, Default)]
pub struct AnimationMixer {
    actions: SmallVec<[ClipAction; 2]>,
}

impl AnimationMixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, action: ClipAction) -> ActionId {
        self.actions.push(action);
        ActionId(self.actions.len() - 1)
    }

    pub fn action(&self, id: ActionId) -> &ClipAction {
        &self.actions[id.0]
    }

    pub fn action_mut(&mut self, id: ActionId) -> &mut ClipAction {
        &mut self.actions[id.0]
    }

    /// Advance every running action by `dt` mixer time.
    pub fn update(&mut self, dt: f32) {
        for action in &mut self.actions {
            action.advance(dt);
        }
    }
}
