use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    Forward,
    Backward,
    SteerLeft,
    SteerRight,
    Handbrake,
    ToggleScheme,
    ToggleDebug,
    ToggleCameraLock,
}

/// Active control scheme. A/D always steer; the free-strafe scheme
/// additionally feeds them into the lateral move axis.
#[derive(Resource, Default)]
pub struct ControlScheme {
    pub free_strafe: bool,
}

/// Space toggles the handbrake rather than holding it; the latched state is
/// what the controller sees each tick.
#[derive(Resource, Default)]
pub struct HandbrakeLatch {
    pub engaged: bool,
}

impl HandbrakeLatch {
    pub fn toggle(&mut self) -> bool {
        self.engaged = !self.engaged;
        self.engaged
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();
    app.init_resource::<ControlScheme>();
    app.init_resource::<HandbrakeLatch>();

    let mut input_map = InputMap::<InputAction>::default();
    input_map.insert(InputAction::Forward, KeyCode::KeyW);
    input_map.insert(InputAction::Backward, KeyCode::KeyS);
    input_map.insert(InputAction::SteerLeft, KeyCode::KeyA);
    input_map.insert(InputAction::SteerRight, KeyCode::KeyD);
    input_map.insert(InputAction::Handbrake, KeyCode::Space);
    input_map.insert(InputAction::ToggleScheme, KeyCode::KeyT);
    input_map.insert(InputAction::ToggleDebug, KeyCode::F3);
    input_map.insert(InputAction::ToggleCameraLock, KeyCode::KeyC);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());

    app.add_systems(Update, (toggle_scheme, toggle_handbrake));
}

fn toggle_scheme(actions: Res<ActionState<InputAction>>, mut scheme: ResMut<ControlScheme>) {
    if actions.just_pressed(&InputAction::ToggleScheme) {
        scheme.free_strafe = !scheme.free_strafe;
        info!(
            "control scheme: {}",
            if scheme.free_strafe { "free strafe" } else { "steer only" }
        );
    }
}

fn toggle_handbrake(actions: Res<ActionState<InputAction>>, mut latch: ResMut<HandbrakeLatch>) {
    if actions.just_pressed(&InputAction::Handbrake) {
        let engaged = latch.toggle();
        info!("handbrake: {}", if engaged { "engaged" } else { "released" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handbrake_latch_flips_each_toggle() {
        let mut latch = HandbrakeLatch::default();
        assert!(!latch.engaged);
        assert!(latch.toggle());
        assert!(latch.engaged);
        assert!(!latch.toggle());
        assert!(!latch.engaged);
    }
}
