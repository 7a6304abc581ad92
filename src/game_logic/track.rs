use crate::game_logic::{CollisionMask, Contact, KinematicBody, overlap};
use bevy::prelude::*;

/// Static track geometry, built once at startup and shared by every car
#[derive(Resource, Clone, Debug)]
pub struct TrackAssets {
    pub border: CollisionMask,
    pub border_offset: Vec2,
    pub finish: CollisionMask,
    pub finish_offset: Vec2,
    // waypoints the computer car steers through, in order
    pub path: Vec<IVec2>,
}

/// Which edge of the finish line a car touched
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinishCrossing {
    Correct,
    Wrong,
}

impl FinishCrossing {
    /// Contact on the top row of the finish mask means the car came in from
    /// the start side, i.e. it is driving the lap backwards.
    pub fn from_contact(contact: &Contact) -> Self {
        if contact.region.y == 0 {
            FinishCrossing::Wrong
        } else {
            FinishCrossing::Correct
        }
    }
}

impl TrackAssets {
    pub fn check_border_collision(&self, body: &KinematicBody, silhouette: &CollisionMask) -> bool {
        overlap(silhouette, body.position, &self.border, self.border_offset).is_some()
    }

    pub fn check_finish_collision(
        &self,
        body: &KinematicBody,
        silhouette: &CollisionMask,
    ) -> Option<Contact> {
        overlap(silhouette, body.position, &self.finish, self.finish_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> TrackAssets {
        TrackAssets {
            border: CollisionMask::from_fn(100, 100, |x, y| x < 5 || y < 5 || x >= 95 || y >= 95),
            border_offset: Vec2::ZERO,
            finish: CollisionMask::filled(40, 6),
            finish_offset: Vec2::new(20.0, 60.0),
            path: vec![IVec2::new(50, 20)],
        }
    }

    fn car_at(x: f32, y: f32) -> KinematicBody {
        KinematicBody::new(Vec2::new(x, y), 4.0, 4.0)
    }

    #[test]
    fn test_border_collision() {
        let track = track();
        let car = CollisionMask::filled(4, 8);

        assert!(!track.check_border_collision(&car_at(40.0, 40.0), &car));
        assert!(track.check_border_collision(&car_at(40.0, 2.5), &car));
        assert!(track.check_border_collision(&car_at(92.0, 40.0), &car));
    }

    #[test]
    fn test_finish_from_below_is_correct() {
        let track = track();
        let car = CollisionMask::filled(4, 8);

        // nose enters the bottom row of the strip
        let contact = track.check_finish_collision(&car_at(30.0, 65.0), &car).unwrap();
        assert_eq!(contact.region.y, 5);
        assert_eq!(contact.body.y, 0);
        assert_eq!(FinishCrossing::from_contact(&contact), FinishCrossing::Correct);
    }

    #[test]
    fn test_finish_from_above_is_wrong() {
        let track = track();
        let car = CollisionMask::filled(4, 8);

        // tail touches the top row while reversing down into the strip
        let contact = track.check_finish_collision(&car_at(30.0, 53.0), &car).unwrap();
        assert_eq!(contact.region.y, 0);
        assert_eq!(contact.body.y, 7);
        assert_eq!(FinishCrossing::from_contact(&contact), FinishCrossing::Wrong);
    }

    #[test]
    fn test_finish_miss() {
        let track = track();
        let car = CollisionMask::filled(4, 8);
        assert!(track.check_finish_collision(&car_at(30.0, 40.0), &car).is_none());
    }
}
