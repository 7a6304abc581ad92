pub mod constants;
pub mod components;
pub mod kinematics;
pub mod mask;
pub mod player;
pub mod path_follower;
pub mod race;
pub mod events;
pub mod track;
pub mod collisions;

pub use constants::*;
pub use components::*;
pub use kinematics::*;
pub use mask::*;
pub use player::*;
pub use path_follower::*;
pub use race::*;
pub use events::*;
pub use track::*;
pub use collisions::*;
