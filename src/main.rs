use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use pixel_racer::game_logic::{
    HudStatus, InputIntents, KinematicBody, PlayerControlled, RaceEvent, RaceState,
};
use pixel_racer::{RaceConfig, RacePlugin, RaceTickSet};

const DEFAULT_CONFIG_PATH: &str = "assets/track.json";

fn main() -> AppExit {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let mut app = App::new();
    app.add_plugins(LogPlugin::default());

    let config = match RaceConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return AppExit::error();
        }
    };
    let tick = config.tick_duration();
    let race = match RacePlugin::new(config) {
        Ok(plugin) => plugin,
        Err(e) => {
            error!("{}", e);
            return AppExit::error();
        }
    };

    // Headless: no window, the runner drives the schedule at the tick rate
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(tick)))
        .add_plugins(race)
        .add_systems(FixedUpdate, autopilot.before(RaceTickSet))
        .add_systems(Update, log_race_events)
        .run()
}

// Stand-in for the input layer: tap the throttle to start the level, then
// leave the player parked and watch the computer car lap.
fn autopilot(race: Res<RaceState>, mut input: ResMut<InputIntents>) {
    input.accelerate = !race.started;
}

fn log_race_events(
    mut events: EventReader<RaceEvent>,
    mut exit: EventWriter<AppExit>,
    race: Res<RaceState>,
    time: Res<Time>,
    player: Query<&KinematicBody, With<PlayerControlled>>,
) {
    for event in events.read() {
        info!("{:?}", event);

        if let Ok(body) = player.single() {
            let [level, level_time, velocity] =
                HudStatus::capture(&race, body, time.elapsed()).lines();
            debug!("{} | {} | {}", level, level_time, velocity);
        }

        if event.ends_session() {
            info!("Session over, shutting down");
            exit.write(AppExit::Success);
        }
    }
}
