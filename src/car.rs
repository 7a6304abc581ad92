use crate::config::{CarConfig, ConfigError, RaceConfig};
use crate::game_logic::{
    AIControlled, Car, KinematicBody, PathFollower, PlayerControlled, Silhouette,
};
use bevy::prelude::*;

fn body_from_config(car: &CarConfig, acceleration: f32) -> KinematicBody {
    KinematicBody::new(Vec2::from(car.start), car.max_velocity, car.rotation_step)
        .with_acceleration(acceleration)
}

/// Everything needed to spawn the two cars, resolved from config up front
#[derive(Resource, Clone, Debug)]
pub struct CarBlueprints {
    pub player: (KinematicBody, Silhouette),
    pub computer: (KinematicBody, Silhouette, PathFollower),
}

impl CarBlueprints {
    pub fn from_config(config: &RaceConfig) -> Result<Self, ConfigError> {
        let player = body_from_config(&config.player, config.acceleration);

        // the computer car is already rolling when a level begins
        let mut computer = body_from_config(&config.computer, config.acceleration);
        let mut follower = PathFollower::new(config.level_speedup);
        follower.advance_level(&mut computer, 1);

        Ok(Self {
            player: (player, Silhouette::new(config.player.silhouette.build()?)),
            computer: (
                computer,
                Silhouette::new(config.computer.silhouette.build()?),
                follower,
            ),
        })
    }
}

pub fn spawn_cars(mut commands: Commands, blueprints: Res<CarBlueprints>) {
    let (body, silhouette) = blueprints.player.clone();
    info!("Spawning player car at {}", body.position);
    commands.spawn((Car, PlayerControlled, body, silhouette));

    let (body, silhouette, follower) = blueprints.computer.clone();
    info!("Spawning computer car at {}", body.position);
    commands.spawn((Car, AIControlled, body, silhouette, follower));
}
