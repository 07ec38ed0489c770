//! Game modes and the field camera
//!
//! Each screen is a `Task`: the title waits for a touch, the main game
//! runs one timed round. Both own a canvas and talk to the rest of the
//! app exclusively through the event bus.

mod field_camera;
mod game_main;
mod score;
mod title;

pub use field_camera::FieldCamera;
pub use game_main::GameMain;
pub use score::GameResult;
pub use title::Title;
