//! Systems of the gravity sandbox, in the order the game registers them:
//!
//! | System           | Kind   | Reads                        | Writes      |
//! |------------------|--------|------------------------------|-------------|
//! | `InputChecker`   | logic  | input source                 | MouseEvents |
//! | `BlockSpawner`   | logic  | MouseEvents                  | new entities|
//! | `GravitySystem`  | logic  | wells' Position + Attraction | Velocity    |
//! | `MovementSystem` | logic  | Velocity                     | Position    |
//! | `RenderSystem`   | draw   | Position, Render             | surface     |

pub mod gravity;
pub mod input;
pub mod movement;
pub mod render;
pub mod spawner;

pub use gravity::GravitySystem;
pub use input::InputChecker;
pub use movement::MovementSystem;
pub use render::RenderSystem;
pub use spawner::BlockSpawner;
