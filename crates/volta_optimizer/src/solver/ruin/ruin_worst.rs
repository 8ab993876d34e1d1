use rand::Rng;
use tracing::error;

use crate::{
    problem::{electric_vehicle_routing_problem::ElectricVehicleRoutingProblem, node::NodeIdx},
    solver::{
        constraints::feasibility_oracle::FeasibilityOracle,
        solution::{removal_bank::RemovalBank, route::Route, working_solution::WorkingSolution},
    },
};

use super::{
    ruin_context::RuinContext,
    ruin_solution::RuinSolution,
    ruin_strategy::AdjacentStation,
    ruin_utils::{excise_customers, fill_biased, removal_count},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorstMetric {
    /// Distance saved by skipping the customer.
    Distance,
    /// Gap between arrival and ready time.
    Time,
    /// Lowest arrival charge first.
    Charge,
}

pub struct RuinWorst {
    pub metric: WorstMetric,
    pub adjacent: AdjacentStation,
}

impl RuinWorst {
    /// Customers of `route` with their cost, higher is worse.
    fn route_costs(
        &self,
        problem: &ElectricVehicleRoutingProblem,
        route: &Route,
        costs: &mut Vec<(NodeIdx, f64)>,
    ) {
        let customers = route
            .nodes()
            .iter()
            .enumerate()
            .filter(|&(_, &node)| problem.is_customer(node));

        match self.metric {
            WorstMetric::Distance => {
                costs.extend(
                    customers.map(|(position, &node)| (node, route.removal_saving(problem, position))),
                );
            }
            WorstMetric::Time | WorstMetric::Charge => {
                let profile = match FeasibilityOracle::new(problem).profile(route.nodes()) {
                    Ok(profile) => profile,
                    Err(err) => {
                        error!(error = %err, "RuinWorst: skipping route without profile");
                        return;
                    }
                };

                costs.extend(customers.map(|(position, &node)| {
                    let cost = if self.metric == WorstMetric::Time {
                        (profile.arrival_times()[position]
                            - problem.node(node).time_window().ready())
                        .abs()
                    } else {
                        -profile.arrival_charge()[position]
                    };
                    (node, cost)
                }));
            }
        }
    }
}

impl RuinSolution for RuinWorst {
    fn ruin_solution<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>) -> RemovalBank
    where
        R: Rng,
    {
        let problem = context.problem;
        let mut costs = Vec::with_capacity(problem.customers().len());
        for route in solution.routes() {
            self.route_costs(problem, route, &mut costs);
        }

        costs.sort_by(|a, b| b.1.total_cmp(&a.1));
        let ranked = costs.iter().map(|&(node, _)| node).collect::<Vec<_>>();

        let count = removal_count(
            ranked.len(),
            &context.params.removal_lower,
            &context.params.removal_upper,
            context.rng,
        );

        let mut bank = RemovalBank::new(problem.num_nodes());
        fill_biased(
            &mut bank,
            &ranked,
            count,
            context.params.worst_removal_bias,
            context.rng,
        );

        excise_customers(solution, &bank, self.adjacent);
        bank
    }
}
