use crate::game_logic::{
    AIControlled, FinishCrossing, KinematicBody, PathFollower, PlayerControlled, RaceEvent,
    RaceState, Silhouette, TrackAssets,
};
use bevy::prelude::*;

type PlayerCarQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut KinematicBody, &'static Silhouette),
    (With<PlayerControlled>, Without<AIControlled>),
>;

type AiCarQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut KinematicBody, &'static mut PathFollower, &'static Silhouette),
    (With<AIControlled>, Without<PlayerControlled>),
>;

/// Put every computer car back on the grid at the race's current level
fn restart_ai_cars(ai_cars: &mut AiCarQuery, level: u32) {
    for (mut body, mut follower, _) in ai_cars.iter_mut() {
        follower.advance_level(&mut body, level);
    }
}

/// Back to level 1 with both cars on the grid
fn reset_session(race: &mut RaceState, player: &mut KinematicBody, ai_cars: &mut AiCarQuery) {
    race.reset();
    player.reset_to_start();
    restart_ai_cars(ai_cars, race.level);
}

// Border bounce, computer win, then the player's finish line check.
// Runs after both cars have moved this tick.
pub fn handle_collisions(
    track: Res<TrackAssets>,
    mut race: ResMut<RaceState>,
    mut events: EventWriter<RaceEvent>,
    mut player_cars: PlayerCarQuery,
    mut ai_cars: AiCarQuery,
) {
    let Ok((mut player, player_silhouette)) = player_cars.single_mut() else {
        return;
    };

    if track.check_border_collision(&player, player_silhouette) {
        player.bounce();
        events.write(RaceEvent::PlayerBounced);
    }

    let computer_finished = ai_cars
        .iter()
        .any(|(body, _, silhouette)| track.check_finish_collision(body, silhouette).is_some());
    if computer_finished {
        info!("Computer won on level {}", race.level);
        reset_session(&mut race, &mut player, &mut ai_cars);
        events.write(RaceEvent::ComputerReachedFinish);
    }

    if let Some(contact) = track.check_finish_collision(&player, player_silhouette) {
        match FinishCrossing::from_contact(&contact) {
            FinishCrossing::Wrong => {
                player.bounce();
                events.write(RaceEvent::FinishCrossedWrong);
            }
            FinishCrossing::Correct => {
                race.next_level();
                player.reset_to_start();
                restart_ai_cars(&mut ai_cars, race.level);
                info!("Finish! Next up: level {}", race.level);
                events.write(RaceEvent::FinishCrossedCorrectly { level: race.level });
            }
        }
    }
}

pub fn check_game_finished(
    mut race: ResMut<RaceState>,
    mut events: EventWriter<RaceEvent>,
    mut player_cars: PlayerCarQuery,
    mut ai_cars: AiCarQuery,
) {
    if !race.game_finished() {
        return;
    }

    info!("All {} levels cleared, player wins", race.levels);
    if let Ok((mut player, _)) = player_cars.single_mut() {
        reset_session(&mut race, &mut player, &mut ai_cars);
    } else {
        race.reset();
        restart_ai_cars(&mut ai_cars, race.level);
    }
    events.write(RaceEvent::GameFinished);
}
