use rand::{Rng, seq::IndexedRandom};

use crate::{
    problem::{electric_vehicle_routing_problem::ElectricVehicleRoutingProblem, node::NodeIdx},
    solver::solution::{removal_bank::RemovalBank, working_solution::WorkingSolution},
};

use super::{
    ruin_context::RuinContext,
    ruin_params::RelatednessWeights,
    ruin_solution::RuinSolution,
    ruin_strategy::AdjacentStation,
    ruin_utils::{excise_customers, fill_biased, removal_count},
};

/// Removes a random seed customer and the customers most related to it.
pub struct RuinRelated {
    pub weights: RelatednessWeights,
    pub adjacent: AdjacentStation,
}

impl RuinRelated {
    /// Lower is more related.
    pub fn relatedness(
        &self,
        problem: &ElectricVehicleRoutingProblem,
        seed: NodeIdx,
        customer: NodeIdx,
        same_route: bool,
    ) -> f64 {
        let seed_node = problem.node(seed);
        let node = problem.node(customer);
        let route_term = if same_route { -1.0 } else { 1.0 };

        self.weights.distance * problem.distance(customer, seed)
            + self.weights.ready_time
                * (node.time_window().ready() - seed_node.time_window().ready()).abs()
            + self.weights.route * route_term
            + self.weights.demand * (node.demand() - seed_node.demand()).abs()
    }
}

impl RuinSolution for RuinRelated {
    fn ruin_solution<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>) -> RemovalBank
    where
        R: Rng,
    {
        let problem = context.problem;
        let mut bank = RemovalBank::new(problem.num_nodes());

        let served = solution.served_customers();
        let Some(&seed) = served.choose(context.rng) else {
            return bank;
        };
        let seed_route = solution.locate(seed).map(|(route_id, _)| route_id);

        let count = removal_count(
            served.len(),
            &context.params.removal_lower,
            &context.params.removal_upper,
            context.rng,
        );

        let mut scored = solution
            .routes_iter_idx()
            .flat_map(|(route_id, route)| {
                route
                    .customers(problem)
                    .filter(move |&customer| customer != seed)
                    .map(move |customer| (customer, Some(route_id) == seed_route))
            })
            .map(|(customer, same_route)| {
                (customer, self.relatedness(problem, seed, customer, same_route))
            })
            .collect::<Vec<_>>();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        let ranked = scored.iter().map(|&(customer, _)| customer).collect::<Vec<_>>();

        bank.push(seed);
        fill_biased(
            &mut bank,
            &ranked,
            count.max(1),
            context.params.related_removal_bias,
            context.rng,
        );

        excise_customers(solution, &bank, self.adjacent);
        bank
    }
}
