//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed step distance per tick
//! - Seeded RNG only
//! - Stable iteration order (walls by placement, projectiles by firing)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{bounce, intersects, reflect_velocity};
pub use rect::OrientedRect;
pub use state::{GameState, Player, Projectile, Target, Wall};
pub use tick::{TickOutcome, advance, finish_frame, generate_level, tick};
