use crate::game_logic::{KinematicBody, PlayerControlled, Steer};
use bevy::prelude::*;

/// Held input intents for the current tick, written by the input layer
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputIntents {
    pub turn_left: bool,
    pub turn_right: bool,
    pub accelerate: bool,
    pub brake: bool,
}

impl InputIntents {
    pub fn any(&self) -> bool {
        self.turn_left || self.turn_right || self.accelerate || self.brake
    }
}

/// Apply one tick of player input to a body.
/// Both turn intents may be held at once and then cancel out.
pub fn drive(body: &mut KinematicBody, input: &InputIntents) {
    if input.turn_left {
        body.rotate(Steer::Left);
    }
    if input.turn_right {
        body.rotate(Steer::Right);
    }

    if input.accelerate {
        body.accelerate_forward();
    } else if input.brake {
        body.accelerate_backward();
    } else {
        body.decay();
    }
}

pub fn move_player_car(
    input: Res<InputIntents>,
    mut player_cars: Query<&mut KinematicBody, With<PlayerControlled>>,
) {
    for mut body in player_cars.iter_mut() {
        drive(&mut body, &input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> KinematicBody {
        KinematicBody::new(Vec2::new(150.0, 200.0), 4.0, 4.0)
    }

    #[test]
    fn test_idle_input_decays() {
        let mut car = body();
        car.velocity = 1.2;
        drive(&mut car, &InputIntents::default());
        assert!((car.velocity - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_accelerate_wins_over_brake() {
        let mut car = body();
        let input = InputIntents {
            accelerate: true,
            brake: true,
            ..Default::default()
        };
        drive(&mut car, &input);
        assert!((car.velocity - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_brake_reverses() {
        let mut car = body();
        let input = InputIntents {
            brake: true,
            ..Default::default()
        };
        drive(&mut car, &input);
        assert!((car.velocity + 0.1).abs() < 1e-6);
        assert!(car.position.y > 200.0);
    }

    #[test]
    fn test_both_turns_cancel() {
        let mut car = body();
        let input = InputIntents {
            turn_left: true,
            turn_right: true,
            accelerate: true,
            ..Default::default()
        };
        drive(&mut car, &input);
        assert_eq!(car.angle, 0.0);
    }

    #[test]
    fn test_turn_applies_before_motion() {
        let mut car = body();
        car.velocity = 2.0;
        let input = InputIntents {
            turn_left: true,
            accelerate: true,
            ..Default::default()
        };
        drive(&mut car, &input);

        assert_eq!(car.angle, 4.0);
        // heading turned left, so the car drifts toward negative x
        assert!(car.position.x < 150.0);
    }

    #[test]
    fn test_any_intent() {
        assert!(!InputIntents::default().any());
        assert!(
            InputIntents {
                brake: true,
                ..Default::default()
            }
            .any()
        );
    }
}
