use crate::game_logic::{ACCELERATION, BOUNCE_BIAS, DECAY_DIVISOR};
use bevy::prelude::*;

/// Steering direction for a single rotation step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
}

/// Position, heading and speed of a car, integrated once per tick.
///
/// The angle is kept in degrees and never wrapped: it only ever flows through
/// `sin`/`cos`, so values outside [0, 360) behave identically. Angle 0 faces
/// negative y (up the screen), positive angles turn toward negative x.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct KinematicBody {
    pub position: Vec2,
    pub angle: f32,
    pub velocity: f32,
    pub max_velocity: f32,
    pub rotation_step: f32,
    pub acceleration: f32,
    start: Vec2,
}

impl KinematicBody {
    pub fn new(start: Vec2, max_velocity: f32, rotation_step: f32) -> Self {
        Self {
            position: start,
            angle: 0.0,
            velocity: 0.0,
            max_velocity,
            rotation_step,
            acceleration: ACCELERATION,
            start,
        }
    }

    pub fn with_acceleration(mut self, acceleration: f32) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn accelerate_forward(&mut self) {
        self.velocity = (self.velocity + self.acceleration).min(self.max_velocity);
        self.integrate();
    }

    /// Reverse is capped at half the forward top speed
    pub fn accelerate_backward(&mut self) {
        self.velocity = (self.velocity - self.acceleration).max(-self.max_velocity / 2.0);
        self.integrate();
    }

    /// Friction when no pedal is held. Clamps at zero, so a reversing car
    /// stops dead instead of rolling on backwards.
    pub fn decay(&mut self) {
        self.velocity = (self.velocity - self.acceleration / DECAY_DIVISOR).max(0.0);
        self.integrate();
    }

    pub fn rotate(&mut self, steer: Steer) {
        match steer {
            Steer::Left => self.angle += self.rotation_step,
            Steer::Right => self.angle -= self.rotation_step,
        }
    }

    // forward euler step along the current heading
    pub fn integrate(&mut self) {
        let radians = self.angle.to_radians();
        let vertical = radians.cos() * self.velocity;
        let horizontal = radians.sin() * self.velocity;

        self.position.x -= horizontal;
        self.position.y -= vertical;
    }

    /// Push the car back off a wall. The +2 bias keeps it from sticking
    /// when it hit the wall at (near) zero speed.
    pub fn bounce(&mut self) {
        self.velocity = -self.velocity + BOUNCE_BIAS;
        self.integrate();
    }

    pub fn reset_to_start(&mut self) {
        self.position = self.start;
        self.angle = 0.0;
        self.velocity = 0.0;
    }

    /// Integer pixel origin of the sprite, truncated toward zero
    pub fn pixel_origin(&self) -> IVec2 {
        IVec2::new(self.position.x as i32, self.position.y as i32)
    }

    /// Whether `point` lies inside the sprite's bounding rectangle.
    /// Left/top edges are inclusive, right/bottom edges exclusive.
    pub fn bounds_contain(&self, size: UVec2, point: IVec2) -> bool {
        let min = self.pixel_origin();
        let max = min + size.as_ivec2();
        point.x >= min.x && point.x < max.x && point.y >= min.y && point.y < max.y
    }
}
