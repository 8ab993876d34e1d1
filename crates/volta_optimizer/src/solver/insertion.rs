use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    problem::node::NodeIdx,
    solver::{constraints::feasibility_oracle::FeasibilityOracle, solution::route::Route},
};

/// A customer placed before `position` of a route, `cost` being the added distance.
#[derive(Clone, Debug, PartialEq)]
pub struct Insertion {
    pub customer: NodeIdx,
    pub position: usize,
    pub cost: f64,
}

/// A customer placed together with the stations needed to keep the route
/// energy feasible.
#[derive(Clone, Debug, PartialEq)]
pub struct AugmentedInsertion {
    pub customer: NodeIdx,
    pub route: Route,
    pub distance: f64,
}

/// Every position between two consecutive nodes, depots excluded.
pub fn for_each_route_insertion(route: &Route, mut f: impl FnMut(usize)) {
    for position in 1..route.len() {
        f(position);
    }
}

/// Feasible insertions of `customer` in `route`, in position order.
pub fn feasible_insertions(
    oracle: FeasibilityOracle,
    route: &Route,
    customer: NodeIdx,
) -> Vec<Insertion> {
    let problem = oracle.problem();
    let mut insertions = Vec::new();

    for_each_route_insertion(route, |position| {
        if oracle.is_feasible(route.with_insertion(position, customer).nodes()) {
            insertions.push(Insertion {
                customer,
                position,
                cost: route.insertion_detour(problem, position, customer),
            });
        }
    });

    insertions
}

/// Cheapest feasible insertion of `customer`, earliest position on ties.
pub fn best_feasible_insertion(
    oracle: FeasibilityOracle,
    route: &Route,
    customer: NodeIdx,
) -> Option<Insertion> {
    let problem = oracle.problem();
    let mut best: Option<Insertion> = None;

    for_each_route_insertion(route, |position| {
        let cost = route.insertion_detour(problem, position, customer);
        if best.as_ref().is_some_and(|insertion| cost >= insertion.cost) {
            return;
        }

        if oracle.is_feasible(route.with_insertion(position, customer).nodes()) {
            best = Some(Insertion {
                customer,
                position,
                cost,
            });
        }
    });

    best
}

/// Cheapest feasible insertion over all `customers`. Candidates are evaluated
/// in parallel on the current rayon pool, ties go to the earlier customer.
pub fn best_direct_insertion(
    oracle: FeasibilityOracle,
    route: &Route,
    customers: &[NodeIdx],
) -> Option<Insertion> {
    let candidates: Vec<Option<Insertion>> = customers
        .par_iter()
        .map(|&customer| best_feasible_insertion(oracle, route, customer))
        .collect();

    cheapest_by(candidates.into_iter().flatten(), |insertion| insertion.cost)
}

/// Insertions that respect capacity and time but run out of energy, handed to
/// `repair`. Returns the shortest repaired route that is feasible.
pub fn best_augmented_insertion<F>(
    oracle: FeasibilityOracle,
    route: &Route,
    customers: &[NodeIdx],
    repair: F,
) -> Option<AugmentedInsertion>
where
    F: Fn(Route) -> Option<Route> + Sync,
{
    let problem = oracle.problem();
    let candidates: Vec<Vec<AugmentedInsertion>> = customers
        .par_iter()
        .map(|&customer| {
            let mut repaired = Vec::new();

            for_each_route_insertion(route, |position| {
                let candidate = route.with_insertion(position, customer);
                let nodes = candidate.nodes();

                if !oracle.is_capacity_feasible(nodes)
                    || !oracle.is_time_feasible(nodes)
                    || oracle.is_energy_feasible(nodes)
                {
                    return;
                }

                if let Some(candidate) = repair(candidate)
                    && oracle.is_feasible(candidate.nodes())
                {
                    repaired.push(AugmentedInsertion {
                        customer,
                        distance: candidate.distance(problem),
                        route: candidate,
                    });
                }
            });

            repaired
        })
        .collect();

    cheapest_by(candidates.into_iter().flatten(), |insertion| insertion.distance)
}

/// First minimum of `items` by `key`.
pub fn cheapest_by<T>(items: impl IntoIterator<Item = T>, key: impl Fn(&T) -> f64) -> Option<T> {
    let mut best: Option<(f64, T)> = None;

    for item in items {
        let cost = key(&item);
        if best.as_ref().is_none_or(|(best_cost, _)| cost < *best_cost) {
            best = Some((cost, item));
        }
    }

    best.map(|(_, item)| item)
}
