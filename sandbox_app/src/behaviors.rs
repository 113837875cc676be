//! Gameplay behaviours used by the sandbox scenes

use engine2d::prelude::*;

/// Moves its entity with the "horizontal" and "vertical" axes
pub struct PlayerController {
    /// Pixels per second at full deflection
    pub speed: f32,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self { speed: 120.0 }
    }
}

impl Behavior for PlayerController {
    fn start(&mut self, ctx: &mut UpdateContext<'_>) {
        if let Some(transform) = ctx.transform() {
            log::info!("Player spawned at {:?}", transform.global_translation());
        }
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let dx = ctx.input.axis("horizontal") * self.speed * ctx.delta_time;
        let dy = ctx.input.axis("vertical") * self.speed * ctx.delta_time;
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        if let Some(mut transform) = ctx.transform_mut() {
            transform.translate(dx, dy);
        }
    }
}

/// Spins its entity at a constant rate
pub struct Spinner {
    /// Degrees per second
    pub degrees_per_second: f32,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            degrees_per_second: 90.0,
        }
    }
}

impl Behavior for Spinner {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let step = self.degrees_per_second * ctx.delta_time;
        if let Some(mut transform) = ctx.transform_mut() {
            transform.rotate_degrees(step);
        }
    }
}

/// Register every sandbox behaviour type
pub fn register_all(scripts: &mut ScriptRegistry) -> Result<(), AppError> {
    scripts.register_default::<PlayerController>("PlayerController")?;
    scripts.register_default::<Spinner>("Spinner")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scene_with_script(behavior: Box<dyn Behavior>) -> (Scene, EntityId) {
        let mut scene = Scene::new("Test");
        let entity = scene.add_entity("Subject");
        let mut script = Script::new("test.rs", "Test");
        script.on_script_load(behavior);
        scene.add_component(entity, script).unwrap();
        (scene, entity)
    }

    fn tick(scene: &mut Scene, input: &InputManager, delta_time: f32) {
        let frame = engine2d::scene::FrameInput {
            input,
            viewport: Viewport::default(),
            delta_time,
        };
        scene.update(&frame);
    }

    #[test]
    fn test_player_controller_follows_axis() {
        let mut input = InputManager::new();
        input.add_axis_input(AxisInput::with_keys("horizontal", &[KeyCode::D], &[KeyCode::A]));
        input.add_axis_input(AxisInput::with_keys("vertical", &[KeyCode::S], &[KeyCode::W]));
        input.handle_key_input(KeyCode::D, true);
        input.update();

        let (mut scene, player) = scene_with_script(Box::new(PlayerController { speed: 100.0 }));
        tick(&mut scene, &input, 0.5);

        let transform = scene.graph().transform(player).unwrap();
        assert_relative_eq!(transform.translation().x, 50.0, epsilon = 1e-5);
        assert_relative_eq!(transform.translation().y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_player_controller_idle_without_bindings() {
        let input = InputManager::new();
        let (mut scene, player) = scene_with_script(Box::new(PlayerController::default()));
        tick(&mut scene, &input, 1.0);

        assert_eq!(scene.graph().transform(player).unwrap().translation(), Vec2::zeros());
    }

    #[test]
    fn test_spinner_rotates_children_too() {
        let input = InputManager::new();
        let (mut scene, hub) = scene_with_script(Box::new(Spinner { degrees_per_second: 90.0 }));
        let arm = scene.add_child(hub, "Arm").unwrap();
        tick(&mut scene, &input, 1.0);

        let expected = std::f32::consts::FRAC_PI_2;
        assert_relative_eq!(scene.graph().transform(hub).unwrap().rotation(), expected, epsilon = 1e-5);
        assert_relative_eq!(scene.graph().transform(arm).unwrap().global_rotation(), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_register_all_twice_fails() {
        let mut scripts = ScriptRegistry::new();
        register_all(&mut scripts).unwrap();
        assert!(scripts.contains("PlayerController"));
        assert!(scripts.contains("Spinner"));
        assert!(register_all(&mut scripts).is_err());
    }
}
