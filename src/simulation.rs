use log::info;

use crate::aggregate::{aggregate, aggregate_parallel, LoadVector};
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::ring::{Ring, RingBuilder};
use crate::sampler::{Identifier, IdentifierSampler};
use crate::virtual_ring::VirtualRingBuilder;

/// Loads from both scenarios of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub plain: LoadVector,
    pub virtual_nodes: LoadVector,
}

/// Runs the plain-ring and virtual-node scenarios for one configuration.
pub struct Simulation {
    config: SimulationConfig,
    sampler: IdentifierSampler,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let sampler = match config.seed {
            Some(seed) => IdentifierSampler::seeded(seed),
            None => IdentifierSampler::from_entropy(),
        };
        if let Some(seed) = sampler.seed() {
            info!("Sampling seed: {}", seed);
        }
        Ok(Simulation { config, sampler })
    }

    /// One identifier per real server, no replication.
    pub fn run_plain(&mut self) -> Result<LoadVector> {
        let servers = self.sampler.sample(self.config.num_servers);
        let ring = RingBuilder::build(&servers)?;
        let loads = self.place_keys(&ring)?;
        info!(
            "Plain ring: {} keys over {} servers",
            loads.total(),
            loads.len()
        );
        Ok(loads)
    }

    /// `replication` fresh identifiers per real server.
    pub fn run_virtual(&mut self) -> Result<LoadVector> {
        let builder = VirtualRingBuilder::new(self.config.num_servers, self.config.replication)?;
        let ring = builder.build(&mut self.sampler)?;
        let loads = self.place_keys(&ring)?;
        info!(
            "Virtual ring: {} keys over {} servers ({} replicas each)",
            loads.total(),
            loads.len(),
            builder.replication()
        );
        Ok(loads)
    }

    pub fn run(&mut self) -> Result<Comparison> {
        let plain = self.run_plain()?;
        let virtual_nodes = self.run_virtual()?;
        Ok(Comparison {
            plain,
            virtual_nodes,
        })
    }

    // each scenario gets its own key batch
    fn place_keys(&mut self, ring: &Ring<Identifier>) -> Result<LoadVector> {
        let keys = self.sampler.sample(self.config.num_keys);
        if self.config.parallel {
            aggregate_parallel(ring, &keys)
        } else {
            aggregate(ring, &keys)
        }
    }
}
