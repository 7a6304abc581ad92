use crate::car::{CarBlueprints, spawn_cars};
use crate::config::{ConfigError, RaceConfig};
use crate::game_logic::{
    InputIntents, RaceEvent, RaceState, TrackAssets, check_game_finished, handle_collisions,
    move_ai_cars, move_player_car, race_running, start_level_on_input,
};
use bevy::prelude::*;

/// Every race system runs inside this set, in tick order
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RaceTickSet;

/// Headless race simulation on a fixed timestep.
///
/// Holds fully resolved track and car data so that a bad config is caught
/// before the app is built rather than inside a system.
pub struct RacePlugin {
    config: RaceConfig,
    blueprints: CarBlueprints,
    track: TrackAssets,
}

impl RacePlugin {
    pub fn new(config: RaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let track = config.build_track()?;
        let blueprints = CarBlueprints::from_config(&config)?;
        Ok(Self {
            config,
            blueprints,
            track,
        })
    }
}

impl Plugin for RacePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(self.track.clone())
            .insert_resource(self.blueprints.clone())
            .insert_resource(RaceState::new(self.config.levels))
            .insert_resource(Time::<Fixed>::from_hz(self.config.tick_rate_hz))
            .init_resource::<InputIntents>()
            .add_event::<RaceEvent>()
            .add_systems(Startup, spawn_cars)
            .add_systems(
                FixedUpdate,
                (
                    start_level_on_input,
                    // player first, then the computer, then collisions on the new positions
                    (move_player_car, move_ai_cars, handle_collisions)
                        .chain()
                        .run_if(race_running),
                    check_game_finished,
                )
                    .chain()
                    .in_set(RaceTickSet),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::{AIControlled, KinematicBody, PathFollower, PlayerControlled};

    fn test_app(config: RaceConfig) -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.add_plugins(RacePlugin::new(config).unwrap());
        app.world_mut().run_schedule(Startup);
        app
    }

    fn tick(app: &mut App) {
        app.world_mut().run_schedule(FixedUpdate);
    }

    fn events(app: &App) -> Vec<RaceEvent> {
        app.world()
            .resource::<Events<RaceEvent>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    fn player_body(app: &mut App) -> KinematicBody {
        let mut query = app
            .world_mut()
            .query_filtered::<&KinematicBody, With<PlayerControlled>>();
        query.iter(app.world()).next().unwrap().clone()
    }

    fn computer(app: &mut App) -> (KinematicBody, PathFollower) {
        let mut query = app
            .world_mut()
            .query_filtered::<(&KinematicBody, &PathFollower), With<AIControlled>>();
        let (body, follower) = query.iter(app.world()).next().unwrap();
        (body.clone(), follower.clone())
    }

    fn set_input(app: &mut App, input: InputIntents) {
        *app.world_mut().resource_mut::<InputIntents>() = input;
    }

    fn set_player_position(app: &mut App, position: Vec2, velocity: f32) {
        let mut query = app
            .world_mut()
            .query_filtered::<&mut KinematicBody, With<PlayerControlled>>();
        let mut body = query.iter_mut(app.world_mut()).next().unwrap();
        body.position = position;
        body.velocity = velocity;
    }

    const ACCELERATE: InputIntents = InputIntents {
        turn_left: false,
        turn_right: false,
        accelerate: true,
        brake: false,
    };

    #[test]
    fn test_zero_tick_rate_rejected_before_build() {
        let config = RaceConfig {
            tick_rate_hz: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            RacePlugin::new(config),
            Err(ConfigError::InvalidTickRate(_))
        ));
    }

    #[test]
    fn test_nothing_moves_before_input() {
        let mut app = test_app(RaceConfig::default());
        for _ in 0..10 {
            tick(&mut app);
        }

        assert!(!app.world().resource::<RaceState>().started);
        assert_eq!(player_body(&mut app).position, Vec2::new(150.0, 200.0));
        assert_eq!(computer(&mut app).0.position, Vec2::new(180.0, 200.0));
        assert!(events(&app).is_empty());
    }

    #[test]
    fn test_input_starts_level_and_moves_both_cars() {
        let mut app = test_app(RaceConfig::default());
        set_input(&mut app, ACCELERATE);
        tick(&mut app);

        assert!(app.world().resource::<RaceState>().started);
        assert_eq!(events(&app), vec![RaceEvent::LevelStarted { level: 1 }]);

        let player = player_body(&mut app);
        assert!((player.velocity - 0.1).abs() < 1e-6);
        assert!(player.position.y < 200.0);

        let (computer, _) = computer(&mut app);
        assert!(computer.position.y < 200.0);
    }

    #[test]
    fn test_border_hit_bounces_player() {
        let mut app = test_app(RaceConfig::default());
        set_input(&mut app, ACCELERATE);
        tick(&mut app);

        // nose just inside the top wall
        set_player_position(&mut app, Vec2::new(400.0, 12.0), 3.0);
        tick(&mut app);

        assert!(events(&app).contains(&RaceEvent::PlayerBounced));
        let player = player_body(&mut app);
        assert!(player.velocity < 0.0);
    }

    #[test]
    fn test_correct_finish_crossing_advances_level() {
        let mut app = test_app(RaceConfig::default());
        set_input(&mut app, ACCELERATE);
        tick(&mut app);

        // coming up from below, the nose reaches the bottom rows of the line
        set_player_position(&mut app, Vec2::new(160.0, 270.0), 3.0);
        set_input(&mut app, InputIntents::default());
        tick(&mut app);

        assert!(events(&app).contains(&RaceEvent::FinishCrossedCorrectly { level: 2 }));
        let race = app.world().resource::<RaceState>();
        assert_eq!(race.level, 2);
        assert!(!race.started);

        assert_eq!(player_body(&mut app).position, Vec2::new(150.0, 200.0));
        let (computer, follower) = computer(&mut app);
        assert_eq!(computer.position, Vec2::new(180.0, 200.0));
        assert!((computer.velocity - 3.2).abs() < 1e-5);
        assert_eq!(follower.current_point, 0);
    }

    #[test]
    fn test_wrong_way_finish_bounces() {
        let mut app = test_app(RaceConfig::default());
        set_input(&mut app, InputIntents {
            brake: true,
            ..Default::default()
        });
        tick(&mut app);

        // reversing down onto the top edge of the line
        set_player_position(&mut app, Vec2::new(160.0, 212.5), -1.0);
        tick(&mut app);

        assert!(events(&app).contains(&RaceEvent::FinishCrossedWrong));
        let race = app.world().resource::<RaceState>();
        assert_eq!(race.level, 1);
        assert!(race.started);
    }

    #[test]
    fn test_computer_win_resets_session() {
        let mut app = test_app(RaceConfig::default());
        set_input(&mut app, ACCELERATE);
        tick(&mut app);
        app.world_mut().resource_mut::<RaceState>().level = 4;

        {
            let mut query = app
                .world_mut()
                .query_filtered::<(&mut KinematicBody, &mut PathFollower), With<AIControlled>>();
            let (mut body, mut follower) = query.iter_mut(app.world_mut()).next().unwrap();
            body.position = Vec2::new(170.0, 240.0);
            follower.current_point = 27;
        }
        tick(&mut app);

        assert!(events(&app).contains(&RaceEvent::ComputerReachedFinish));
        let race = app.world().resource::<RaceState>();
        assert_eq!(race.level, 1);
        assert!(!race.started);

        let (computer, follower) = computer(&mut app);
        assert_eq!(computer.position, Vec2::new(180.0, 200.0));
        assert_eq!(computer.velocity, 3.0);
        assert_eq!(follower.current_point, 0);
    }

    #[test]
    fn test_clearing_last_level_finishes_game() {
        let mut app = test_app(RaceConfig {
            levels: 2,
            ..Default::default()
        });
        set_input(&mut app, ACCELERATE);
        tick(&mut app);
        app.world_mut().resource_mut::<RaceState>().level = 2;

        set_player_position(&mut app, Vec2::new(160.0, 270.0), 3.0);
        tick(&mut app);

        let events = events(&app);
        assert!(events.contains(&RaceEvent::FinishCrossedCorrectly { level: 3 }));
        assert_eq!(events.last(), Some(&RaceEvent::GameFinished));

        let race = app.world().resource::<RaceState>();
        assert_eq!(race.level, 1);
        assert!(!race.game_finished());
    }
}
