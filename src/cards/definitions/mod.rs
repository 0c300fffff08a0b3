//! Individual card definitions.

mod basic_forest;
mod basic_island;
mod basic_mountain;
mod basic_plains;
mod basic_swamp;
mod forked_bolt;
mod grizzly_bears;
mod lightning_bolt;
mod savannah_lions;

pub use basic_forest::basic_forest;
pub use basic_island::basic_island;
pub use basic_mountain::basic_mountain;
pub use basic_plains::basic_plains;
pub use basic_swamp::basic_swamp;
pub use forked_bolt::forked_bolt;
pub use grizzly_bears::grizzly_bears;
pub use lightning_bolt::lightning_bolt;
pub use savannah_lions::savannah_lions;
