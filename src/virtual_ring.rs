use log::debug;
use rand::Rng;

use crate::error::{Error, Result};
use crate::ring::{Point, Ring};
use crate::sampler::{Identifier, IdentifierSampler};

/// Default number of virtual nodes per real server.
pub const DEFAULT_REPLICATION: usize = 4;

/// Builds a ring carrying `replication` virtual nodes per real server.
///
/// Every virtual identifier is paired with its owner at generation time and
/// the pair is sorted as a unit, so ownership never has to be inferred from
/// the position on the sorted ring.
pub struct VirtualRingBuilder {
    num_servers: usize,
    replication: usize,
    total: usize,
}

impl VirtualRingBuilder {
    pub fn new(num_servers: usize, replication: usize) -> Result<Self> {
        if num_servers == 0 {
            return Err(Error::invalid("number of servers must be positive"));
        }
        if replication == 0 {
            return Err(Error::invalid("replication factor must be positive"));
        }
        let total = num_servers.checked_mul(replication).ok_or_else(|| {
            Error::invalid(format!(
                "{} servers x {} replicas overflows the ring size",
                num_servers, replication
            ))
        })?;
        Ok(VirtualRingBuilder {
            num_servers,
            replication,
            total,
        })
    }

    pub fn replication(&self) -> usize {
        self.replication
    }

    /// Draws `num_servers * replication` identifiers, server by server.
    pub fn build<R: Rng>(&self, sampler: &mut IdentifierSampler<R>) -> Result<Ring<Identifier>> {
        let points = (0..self.num_servers)
            .flat_map(|owner| std::iter::repeat(owner).take(self.replication))
            .map(|owner| Point {
                id: sampler.next_identifier(),
                owner,
            })
            .collect();
        self.build_from_points(points)
    }

    /// Builds from explicit `(identifier, owner)` pairs in generation order.
    pub fn build_from_points(&self, points: Vec<Point<Identifier>>) -> Result<Ring<Identifier>> {
        if points.len() != self.total {
            return Err(Error::invalid(format!(
                "expected {} virtual nodes, got {}",
                self.total,
                points.len()
            )));
        }
        debug!(
            "Virtual ring: {} servers x {} replicas",
            self.num_servers, self.replication
        );
        Ring::from_points(points, self.num_servers)
    }
}
