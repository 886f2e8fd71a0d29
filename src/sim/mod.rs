//! Frame-driven simulation module
//!
//! All gameplay logic lives here. Single-threaded and run to completion:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod physics;
pub mod scheduler;
pub mod scroll;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Contact, ContactOutcome, ContactRule, contact_rule, find_contacts, resolve_contacts};
pub use entity::{Category, Entity, EntityId, EntityKind, EntityStore};
pub use scheduler::{Scheduler, SpawnKind, SpawnTrigger};
pub use scroll::{GroundLoop, Motion, layout_ground};
pub use spawner::{SpawnBand, spawn_coin, spawn_hazard};
pub use state::{GameEvent, GamePhase, SimulationState};
pub use tick::{TickInput, tick};
