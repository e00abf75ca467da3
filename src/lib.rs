pub mod aggregate;
pub mod config;
pub mod error;
pub mod log;
pub mod ring;
pub mod sampler;
pub mod simulation;
pub mod stats;
pub mod virtual_ring;

pub use aggregate::{aggregate, aggregate_parallel, LoadVector};
pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use ring::{find_owner, Placement, Ring, RingBuilder};
pub use sampler::{Identifier, IdentifierSampler};
pub use simulation::{Comparison, Simulation};
pub use stats::{Histogram, LoadMetrics};
pub use virtual_ring::VirtualRingBuilder;
