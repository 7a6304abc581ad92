use bevy::prelude::*;

use crate::game_logic::CollisionMask;

#[derive(Component)]
pub struct Car;

#[derive(Component)]
pub struct PlayerControlled;

#[derive(Component)]
pub struct AIControlled;

/// Collision silhouette of a car, taken from its unrotated sprite.
#[derive(Component, Clone, Debug, Deref, DerefMut)]
pub struct Silhouette {
    pub mask: CollisionMask,
}

impl Silhouette {
    pub fn new(mask: CollisionMask) -> Self {
        Self { mask }
    }
}
