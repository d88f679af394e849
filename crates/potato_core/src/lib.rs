pub mod geom;
pub mod input;
pub mod time;

pub use geom::Aabb;
pub use input::{GameKey, InputQueue, KeyTransition};
pub use time::TimeState;
