//! Scripted input playback
//!
//! Deterministic [`InputSource`] used by the headless demo and the
//! integration tests. A script is a sequence of steps, each holding a set of
//! keys and an optional pointer velocity for a number of frames.

use super::{InputSample, InputSource, KeyCode, KeySet};

/// One segment of a scripted input track
#[derive(Debug, Clone)]
pub struct ScriptStep {
    /// How many frames this step lasts
    pub frames: u32,

    /// Keys held for the duration of the step
    pub keys: Vec<KeyCode>,

    /// Pointer velocity in pixels per frame, if the pointer moves
    pub pointer_velocity: Option<(f64, f64)>,
}

impl ScriptStep {
    /// A step with no keys and a stationary pointer
    pub fn idle(frames: u32) -> Self {
        Self {
            frames,
            keys: Vec::new(),
            pointer_velocity: None,
        }
    }

    /// A step holding the given keys
    pub fn hold(frames: u32, keys: &[KeyCode]) -> Self {
        Self {
            frames,
            keys: keys.to_vec(),
            pointer_velocity: None,
        }
    }

    /// A step sweeping the pointer at a constant velocity
    pub fn sweep(frames: u32, velocity: (f64, f64)) -> Self {
        Self {
            frames,
            keys: Vec::new(),
            pointer_velocity: Some(velocity),
        }
    }
}

/// Replays a fixed input track frame by frame
///
/// Once the track is exhausted every poll reports an idle frame with the
/// pointer at rest, so a bounded engine run terminates on its frame budget.
pub struct ScriptedInput {
    steps: Vec<ScriptStep>,
    step_index: usize,
    frame_in_step: u32,
    pointer: (f64, f64),
}

impl ScriptedInput {
    /// Create a playback source starting with the pointer at the given
    /// position (typically the window center)
    pub fn new(start_pointer: (f64, f64), steps: Vec<ScriptStep>) -> Self {
        Self {
            steps,
            step_index: 0,
            frame_in_step: 0,
            pointer: start_pointer,
        }
    }

    fn current_step(&self) -> Option<&ScriptStep> {
        self.steps.get(self.step_index)
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputSample {
        let Some(step) = self.current_step().cloned() else {
            return InputSample {
                keys: KeySet::default(),
                pointer: Some(self.pointer),
            };
        };

        if let Some((vx, vy)) = step.pointer_velocity {
            self.pointer.0 += vx;
            self.pointer.1 += vy;
        }

        let mut keys = KeySet::default();
        for key in &step.keys {
            keys.press(*key);
        }

        self.frame_in_step += 1;
        if self.frame_in_step >= step.frames {
            self.frame_in_step = 0;
            self.step_index += 1;
        }

        InputSample {
            keys,
            pointer: Some(self.pointer),
        }
    }
}
