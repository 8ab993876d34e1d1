use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};

use super::{location::Location, node::NodeIdx};

pub type Distance = f64;
pub type Time = f64;

/// Flat distance and travel-time matrices between nodes.
/// The entry for a pair is stored at `from * num_nodes + to`.
#[derive(Debug, Clone)]
pub struct ArcTable {
    distances: Vec<Distance>,
    times: Vec<Time>,
    num_nodes: usize,
}

impl ArcTable {
    /// Euclidean distances, travel time is `distance / speed`.
    pub fn from_euclidean(locations: &[Location], speed: f64) -> Self {
        let num_nodes = locations.len();
        let mut distances: Vec<Distance> = vec![0.0; num_nodes * num_nodes];
        let mut times: Vec<Time> = vec![0.0; num_nodes * num_nodes];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                let distance = from.euclidean_distance(to);
                distances[i * num_nodes + j] = distance;
                times[i * num_nodes + j] = distance / speed;
            }
        }

        ArcTable {
            distances,
            times,
            num_nodes,
        }
    }

    pub fn from_flat(distances: Vec<Distance>, times: Vec<Time>) -> Self {
        assert_eq!(distances.len(), times.len());
        let num_nodes = distances.len().isqrt();
        assert_eq!(num_nodes * num_nodes, distances.len());

        ArcTable {
            distances,
            times,
            num_nodes,
        }
    }

    #[inline(always)]
    fn index(&self, from: NodeIdx, to: NodeIdx) -> usize {
        from.get() * self.num_nodes + to.get()
    }

    #[inline(always)]
    pub fn distance(&self, from: NodeIdx, to: NodeIdx) -> Distance {
        self.distances[self.index(from, to)]
    }

    #[inline(always)]
    pub fn travel_time(&self, from: NodeIdx, to: NodeIdx) -> Time {
        self.times[self.index(from, to)]
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.num_nodes).all(|i| {
            (0..self.num_nodes).all(|j| {
                self.distances[i * self.num_nodes + j] == self.distances[j * self.num_nodes + i]
            })
        })
    }

    /// Returns a copy where each off-diagonal travel time is, with probability
    /// `probability`, shifted by a `Normal(0, std_dev)` sample. Shifts that would
    /// make the travel time non-positive are dropped. Distances are untouched.
    /// A negative or non-finite `std_dev` is rejected.
    pub fn with_perturbed_travel_times<R>(
        &self,
        probability: f64,
        std_dev: f64,
        rng: &mut R,
    ) -> Result<ArcTable, NormalError>
    where
        R: Rng,
    {
        if !(std_dev.is_finite() && std_dev >= 0.0) {
            return Err(NormalError::BadVariance);
        }

        let normal = Normal::new(0.0, std_dev)?;
        let mut times = self.times.clone();

        for from in 0..self.num_nodes {
            for to in 0..self.num_nodes {
                if from == to || !rng.random_bool(probability.clamp(0.0, 1.0)) {
                    continue;
                }

                let index = from * self.num_nodes + to;
                let shifted = times[index] + normal.sample(rng);
                if shifted > 0.0 {
                    times[index] = shifted;
                }
            }
        }

        Ok(ArcTable {
            distances: self.distances.clone(),
            times,
            num_nodes: self.num_nodes,
        })
    }
}
