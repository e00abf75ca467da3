use std::ops::Index;

use rayon::prelude::*;

use crate::error::Result;
use crate::ring::Placement;

/// Number of keys resolved to each real server, indexed by server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadVector(Vec<u64>);

impl LoadVector {
    pub fn zeroed(num_servers: usize) -> Self {
        LoadVector(vec![0; num_servers])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counters; equals the number of keys aggregated.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    fn record(&mut self, server: usize) {
        self.0[server] += 1;
    }

    fn merge(mut self, other: LoadVector) -> LoadVector {
        for (a, b) in self.0.iter_mut().zip(other.0) {
            *a += b;
        }
        self
    }
}

impl Index<usize> for LoadVector {
    type Output = u64;

    fn index(&self, server: usize) -> &u64 {
        &self.0[server]
    }
}

/// Resolves every key and counts hits per real server.
pub fn aggregate<T, P>(placement: &P, keys: &[T]) -> Result<LoadVector>
where
    T: Copy,
    P: Placement<T>,
{
    let mut loads = LoadVector::zeroed(placement.num_servers());
    for &key in keys {
        loads.record(placement.owner_of(key)?);
    }
    Ok(loads)
}

/// Same result as [`aggregate`], with lookups spread over the rayon pool.
///
/// Each worker fills its own partial vector; partials are summed at the end.
pub fn aggregate_parallel<T, P>(placement: &P, keys: &[T]) -> Result<LoadVector>
where
    T: Copy + Send + Sync,
    P: Placement<T> + Sync,
{
    let n = placement.num_servers();
    keys.par_iter()
        .try_fold(
            || LoadVector::zeroed(n),
            |mut partial, &key| -> Result<LoadVector> {
                partial.record(placement.owner_of(key)?);
                Ok(partial)
            },
        )
        .try_reduce(|| LoadVector::zeroed(n), |a, b| -> Result<LoadVector> {
            Ok(a.merge(b))
        })
}
