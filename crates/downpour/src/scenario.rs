//! Scripted camera flight for the headless demo
//!
//! Walks into the scene between the two cubes, pans across them, switches
//! to snow for a stretch, and returns to rain. The track is deterministic,
//! so two runs with the same configuration produce identical frames.

use storm_engine::config::EngineConfig;
use storm_engine::input::script::{ScriptStep, ScriptedInput};
use storm_engine::input::KeyCode;

/// Build the demo input track
pub fn flythrough(config: &EngineConfig) -> ScriptedInput {
    let center = (
        f64::from(config.window.width) / 2.0,
        f64::from(config.window.height) / 2.0,
    );

    ScriptedInput::new(
        center,
        vec![
            // Let the field settle, then walk forward into the rain
            ScriptStep::idle(30),
            ScriptStep::hold(80, &[KeyCode::W]),
            // Pan right across the first cube
            ScriptStep::sweep(60, (6.0, 0.0)),
            // Strafe while looking slightly upward into the fall
            ScriptStep {
                frames: 60,
                keys: vec![KeyCode::D],
                pointer_velocity: Some((0.0, -3.0)),
            },
            // Switch to snow and drift through it
            ScriptStep::hold(2, &[KeyCode::R]),
            ScriptStep::hold(90, &[KeyCode::W]),
            ScriptStep::sweep(80, (-5.0, 1.5)),
            // Back to rain for the finish
            ScriptStep::hold(2, &[KeyCode::T]),
            ScriptStep::hold(60, &[KeyCode::S]),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use storm_engine::input::InputSource;

    #[test]
    fn test_track_reaches_snow_and_returns() {
        let config = EngineConfig::default();
        let mut input = flythrough(&config);
        let mut saw_snow_toggle = false;
        let mut saw_rain_toggle = false;
        for _ in 0..500 {
            let sample = input.poll();
            saw_snow_toggle |= sample.keys.is_down(KeyCode::R);
            saw_rain_toggle |= sample.keys.is_down(KeyCode::T);
        }
        assert!(saw_snow_toggle);
        assert!(saw_rain_toggle);
    }
}
