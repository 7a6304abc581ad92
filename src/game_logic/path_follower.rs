use crate::game_logic::{AIControlled, KinematicBody, LEVEL_SPEEDUP, Silhouette, TrackAssets};
use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_2, PI};

/// Heading in degrees that points the car's nose at `target`.
///
/// `atan(dx / dy)` only covers half the circle, so targets below the car
/// (larger y) get an extra half turn. A target on the same row is treated as
/// 90 degrees before that correction.
pub fn desired_heading(position: Vec2, target: IVec2) -> f32 {
    let dx = target.x as f32 - position.x;
    let dy = target.y as f32 - position.y;

    let mut radians = if dy == 0.0 { FRAC_PI_2 } else { (dx / dy).atan() };
    if target.y as f32 > position.y {
        radians += PI;
    }

    radians.to_degrees()
}

/// Rotate `angle` toward `desired` by at most `step` degrees.
///
/// Only differences of 180 or more are folded back by a full turn. A
/// difference of -180 or less is left alone, so the car takes the long way
/// round in that case. Existing races depend on this, keep it.
pub fn turn_toward(angle: f32, desired: f32, step: f32) -> f32 {
    let mut difference = angle - desired;
    if difference >= 180.0 {
        difference -= 360.0;
    }

    if difference > 0.0 {
        angle - step.min(difference.abs())
    } else {
        angle + step.min(difference.abs())
    }
}

/// Waypoint steering for the computer car. The path itself lives in
/// `TrackAssets` and is shared read-only; only the index is per car.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct PathFollower {
    pub current_point: usize,
    pub level_speedup: f32,
}

impl Default for PathFollower {
    fn default() -> Self {
        Self {
            current_point: 0,
            level_speedup: LEVEL_SPEEDUP,
        }
    }
}

impl PathFollower {
    pub fn new(level_speedup: f32) -> Self {
        Self {
            current_point: 0,
            level_speedup,
        }
    }

    pub fn is_finished(&self, path: &[IVec2]) -> bool {
        self.current_point >= path.len()
    }

    /// Steer, check the waypoint, then move. Returns false once the path is
    /// exhausted, after which the car stays parked where it is.
    pub fn step(&mut self, body: &mut KinematicBody, path: &[IVec2], sprite_size: UVec2) -> bool {
        let Some(&target) = path.get(self.current_point) else {
            return false;
        };

        let desired = desired_heading(body.position, target);
        body.angle = turn_toward(body.angle, desired, body.rotation_step);

        if body.bounds_contain(sprite_size, target) {
            self.current_point += 1;
            debug!("Computer car reached waypoint {} at {}", self.current_point, target);
        }

        body.integrate();
        true
    }

    /// Put the car back on the grid for `level`, one speed notch faster per level
    pub fn advance_level(&mut self, body: &mut KinematicBody, level: u32) {
        body.reset_to_start();
        body.velocity = body.max_velocity + level.saturating_sub(1) as f32 * self.level_speedup;
        self.current_point = 0;
    }
}

pub fn move_ai_cars(
    track: Res<TrackAssets>,
    mut ai_cars: Query<(&mut KinematicBody, &mut PathFollower, &Silhouette), With<AIControlled>>,
) {
    for (mut body, mut follower, silhouette) in ai_cars.iter_mut() {
        follower.step(&mut body, &track.path, silhouette.size());
    }
}
