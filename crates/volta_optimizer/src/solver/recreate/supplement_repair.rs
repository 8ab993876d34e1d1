use thiserror::Error;
use tracing::debug;

use crate::solver::solution::route::Route;

use super::station_insertion::StationInsertion;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("station repair gave up after {attempts} attempts")]
pub struct StationRepairExhausted {
    pub attempts: usize,
    /// The route as it was handed to the repair.
    pub route: Route,
}

/// Bounded repair alternating the extended first-feasible search with a
/// forced station in front of the first negative node.
pub struct SupplementRepair<'a> {
    station_insertion: StationInsertion<'a>,
    max_attempts: usize,
}

impl<'a> SupplementRepair<'a> {
    pub fn new(station_insertion: StationInsertion<'a>, max_attempts: usize) -> Self {
        SupplementRepair {
            station_insertion,
            max_attempts,
        }
    }

    pub fn repair(&self, route: Route) -> Result<Route, StationRepairExhausted> {
        let oracle = self.station_insertion.oracle();
        let mut current = route.clone();
        let mut attempts = 0;

        while !oracle.is_feasible(current.nodes()) {
            attempts += 1;
            if attempts >= self.max_attempts {
                return Err(StationRepairExhausted { attempts, route });
            }

            current = self.station_insertion.first_feasible_extended(current);
            if oracle.is_feasible(current.nodes()) {
                break;
            }

            if !self
                .station_insertion
                .force_station_before_negative(&mut current)
            {
                // Not an energy failure, stations cannot help.
                debug!(attempts, "station repair found no negative charge to fix");
                return Err(StationRepairExhausted { attempts, route });
            }
        }

        Ok(current)
    }
}
