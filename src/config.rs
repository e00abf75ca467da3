use clap::Parser;

use crate::error::{Error, Result};
use crate::virtual_ring::DEFAULT_REPLICATION;

/// Compare key distribution on a plain consistent-hash ring against one
/// with virtual nodes.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "ring_sim", version)]
pub struct SimulationConfig {
    /// Number of real servers
    #[arg(long = "servers", default_value_t = 100)]
    pub num_servers: usize,

    /// Number of keys placed in each scenario
    #[arg(long = "keys", default_value_t = 10_000)]
    pub num_keys: usize,

    /// Virtual nodes per real server
    #[arg(long = "replication", default_value_t = DEFAULT_REPLICATION)]
    pub replication: usize,

    /// Seed for identifier sampling; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Histogram bins in the report
    #[arg(long, default_value_t = 10)]
    pub bins: usize,

    /// Resolve keys on the rayon thread pool
    #[arg(long)]
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            num_servers: 100,
            num_keys: 10_000,
            replication: DEFAULT_REPLICATION,
            seed: None,
            bins: 10,
            parallel: false,
        }
    }
}

impl SimulationConfig {
    pub fn new(num_servers: usize, num_keys: usize) -> Self {
        SimulationConfig {
            num_servers,
            num_keys,
            ..Self::default()
        }
    }

    pub fn with_replication(mut self, replication: usize) -> Self {
        self.replication = replication;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_servers == 0 {
            return Err(Error::invalid("--servers must be at least 1"));
        }
        if self.replication == 0 {
            return Err(Error::invalid("--replication must be at least 1"));
        }
        if self.bins == 0 {
            return Err(Error::invalid("--bins must be at least 1"));
        }
        Ok(())
    }
}
