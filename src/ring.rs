use log::debug;
use num_traits::PrimInt;

use crate::error::{Error, Result};
use crate::sampler::Identifier;

/// Resolves a key to the index of the real server that owns it.
pub trait Placement<T> {
    /// Number of real servers, i.e. the length of the load vector.
    fn num_servers(&self) -> usize;
    fn owner_of(&self, key: T) -> Result<usize>;
}

/// An identifier on the ring together with the real server that placed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point<T> {
    pub id: T,
    pub owner: usize,
}

/// Sorted, immutable ring of identifiers.
///
/// `owners[i]` is the real-server index of `ids[i]`; both vectors are
/// ordered together so a lookup position maps straight to its owner.
#[derive(Debug, Clone)]
pub struct Ring<T = Identifier> {
    ids: Vec<T>,
    owners: Vec<usize>,
    num_servers: usize,
}

impl<T: PrimInt> Ring<T> {
    /// Sorts the points by identifier, carrying each owner along.
    ///
    /// The sort is stable: identifiers that collide keep generation order.
    pub(crate) fn from_points(mut points: Vec<Point<T>>, num_servers: usize) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::invalid("a ring needs at least one identifier"));
        }
        if let Some(p) = points.iter().find(|p| p.owner >= num_servers) {
            return Err(Error::invalid(format!(
                "owner {} out of range for {} servers",
                p.owner, num_servers
            )));
        }
        points.sort_by_key(|p| p.id);
        let (ids, owners): (Vec<T>, Vec<usize>) =
            points.into_iter().map(|p| (p.id, p.owner)).unzip();
        debug_assert!(ids.windows(2).all(|w| w[0] <= w[1]), "ring is not sorted");
        let ring = Ring {
            ids,
            owners,
            num_servers,
        };
        debug!(
            "Ring built: {} points for {} servers",
            ring.len(),
            ring.num_servers
        );
        Ok(ring)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ring identifiers in ascending order.
    pub fn identifiers(&self) -> &[T] {
        &self.ids
    }

    pub fn owner_at(&self, position: usize) -> Option<usize> {
        self.owners.get(position).copied()
    }

    pub fn points(&self) -> impl Iterator<Item = Point<T>> + '_ {
        self.ids
            .iter()
            .zip(&self.owners)
            .map(|(&id, &owner)| Point { id, owner })
    }

    /// Position on the ring responsible for `key`.
    pub fn find_position(&self, key: T) -> Result<usize> {
        find_owner(&self.ids, key)
    }
}

impl<T: PrimInt> Placement<T> for Ring<T> {
    fn num_servers(&self) -> usize {
        self.num_servers
    }

    fn owner_of(&self, key: T) -> Result<usize> {
        let position = self.find_position(key)?;
        Ok(self.owners[position])
    }
}

/// Builds the plain ring: one point per real server.
pub struct RingBuilder;

impl RingBuilder {
    /// `server_ids[i]` belongs to server `i`. That index survives the sort,
    /// so loads are reported in input order rather than ring order.
    pub fn build<T: PrimInt>(server_ids: &[T]) -> Result<Ring<T>> {
        if server_ids.is_empty() {
            return Err(Error::invalid("a ring needs at least one server"));
        }
        let points = server_ids
            .iter()
            .enumerate()
            .map(|(owner, &id)| Point { id, owner })
            .collect();
        Ring::from_points(points, server_ids.len())
    }
}

/// Returns the position of the smallest element `>= key`, or 0 when `key`
/// is greater than every element (the ring wraps from max back to min).
///
/// `ring` must be sorted ascending. An unsorted slice gives an unspecified
/// position.
pub fn find_owner<T: PrimInt>(ring: &[T], key: T) -> Result<usize> {
    if ring.is_empty() {
        return Err(Error::EmptyRing);
    }
    let index = ring.partition_point(|&id| id < key);
    if index == ring.len() {
        return Ok(0);
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::init_test_logger;
    use crate::sampler::IdentifierSampler;

    #[test]
    fn key_between_servers_goes_to_next() {
        assert_eq!(find_owner(&[10u32, 50, 90], 30), Ok(1));
    }

    #[test]
    fn key_past_max_wraps_to_first() {
        assert_eq!(find_owner(&[10u32, 50, 90], 95), Ok(0));
    }

    #[test]
    fn key_below_min_goes_to_first() {
        assert_eq!(find_owner(&[10u32, 50, 90], 3), Ok(0));
    }

    #[test]
    fn key_equal_to_identifier_is_owned_by_it() {
        assert_eq!(find_owner(&[10u32, 50, 90], 50), Ok(1));
        assert_eq!(find_owner(&[10u32, 50, 90], 90), Ok(2));
    }

    // Keys near the top of the space fall past every identifier and wrap to
    // position 0 on both plain and virtual rings.
    #[test]
    fn max_identifier_wraps_unless_present() {
        assert_eq!(find_owner(&[10u32, 50, 90], u32::MAX), Ok(0));
        assert_eq!(find_owner(&[10u32, u32::MAX], u32::MAX), Ok(1));
    }

    #[test]
    fn duplicates_resolve_to_leftmost() {
        assert_eq!(find_owner(&[10u32, 50, 50, 90], 50), Ok(1));
        assert_eq!(find_owner(&[10u32, 50, 50, 90], 51), Ok(3));
    }

    #[test]
    fn unsorted_slice_still_yields_a_position() {
        let pos = find_owner(&[90u32, 10, 50], 30).unwrap();
        assert!(pos < 3);
    }

    #[test]
    fn empty_ring_is_an_error() {
        assert_eq!(find_owner::<u32>(&[], 7), Err(Error::EmptyRing));
    }

    #[test]
    fn builder_rejects_no_servers() {
        assert!(matches!(
            RingBuilder::build::<u32>(&[]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn builder_sorts_and_keeps_input_index() {
        init_test_logger();
        let ring = RingBuilder::build(&[90u32, 10, 50]).unwrap();
        assert_eq!(ring.identifiers(), &[10, 50, 90]);
        assert_eq!(ring.num_servers(), 3);
        assert_eq!(ring.owner_at(0), Some(1));
        assert_eq!(ring.owner_at(1), Some(2));
        assert_eq!(ring.owner_at(2), Some(0));
        assert_eq!(ring.owner_at(3), None);

        assert_eq!(ring.find_position(30), Ok(1));
        assert_eq!(ring.owner_of(30), Ok(2));
        assert_eq!(ring.owner_of(95), Ok(1));
    }

    #[test]
    fn builder_keeps_colliding_identifiers() {
        let ring = RingBuilder::build(&[7u32, 7, 3]).unwrap();
        assert_eq!(ring.len(), 3);
        let points: Vec<_> = ring.points().collect();
        assert_eq!(
            points,
            vec![
                Point { id: 3, owner: 2 },
                Point { id: 7, owner: 0 },
                Point { id: 7, owner: 1 },
            ]
        );
    }

    #[test]
    fn lookup_is_in_range_and_repeatable() {
        init_test_logger();
        let mut sampler = IdentifierSampler::seeded(11);
        for size in [1usize, 2, 5, 64] {
            let ring = RingBuilder::build(&sampler.sample(size)).unwrap();
            let max = *ring.identifiers().last().unwrap();
            let min = ring.identifiers()[0];
            let mut keys = sampler.sample(500);
            keys.extend([0, min, max, max.saturating_add(1), u32::MAX]);
            for key in keys {
                let pos = ring.find_position(key).unwrap();
                assert!(pos < ring.len());
                assert_eq!(ring.find_position(key), Ok(pos));
                assert!(ring.owner_of(key).unwrap() < size);
            }
        }
    }

    #[test]
    fn works_over_other_integer_widths() {
        let ring = RingBuilder::build(&[200u8, 20, 100]).unwrap();
        assert_eq!(ring.owner_of(150u8), Ok(0));
        assert_eq!(ring.owner_of(250u8), Ok(1));
        assert_eq!(find_owner(&[1u64 << 40, 1 << 50], 1 << 45), Ok(1));
    }
}
