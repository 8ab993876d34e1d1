use rand::Rng;

use crate::{
    problem::node::NodeIdx,
    solver::solution::{removal_bank::RemovalBank, working_solution::WorkingSolution},
};

use super::{ruin_params::RemovalBound, ruin_strategy::AdjacentStation};

/// Draws beyond which biased sampling stops and completes in rank order.
const MAX_DRAWS_PER_ITEM: usize = 1_000;

/// `ceil(uniform(lower(n), upper(n)))`, never more than `count`.
pub fn removal_count<R>(count: usize, lower: &RemovalBound, upper: &RemovalBound, rng: &mut R) -> usize
where
    R: Rng,
{
    if count == 0 {
        return 0;
    }

    let low = lower.apply(count);
    let high = upper.apply(count).max(low);
    let drawn = rng.random_range(low..=high).ceil() as usize;

    drawn.min(count)
}

/// Banks items of `ranked` until the bank holds `target` customers, drawing
/// index `floor(u^bias * span)` with `span = min(target, ranked.len())`.
/// A larger bias favours the head of the ranking.
pub fn fill_biased<R>(
    bank: &mut RemovalBank,
    ranked: &[NodeIdx],
    target: usize,
    bias: f64,
    rng: &mut R,
) where
    R: Rng,
{
    debug_assert!(ranked.iter().all(|&customer| !bank.contains(customer)));

    let target = target.min(bank.len() + ranked.len());
    let span = target.min(ranked.len());
    if span == 0 {
        return;
    }

    let mut draws = 0;
    while bank.len() < target && draws < MAX_DRAWS_PER_ITEM * span {
        let u: f64 = rng.random();
        let index = ((u.powf(bias) * span as f64).floor() as usize).min(span - 1);
        bank.push(ranked[index]);
        draws += 1;
    }

    for &customer in ranked {
        if bank.len() >= target {
            break;
        }
        bank.push(customer);
    }
}

/// Removes every banked customer from its route, together with the adjacent
/// station visit when requested.
pub fn excise_customers(solution: &mut WorkingSolution, bank: &RemovalBank, adjacent: AdjacentStation) {
    let problem = solution.problem_arc().clone();

    for route_index in 0..solution.num_routes() {
        let route = solution.route_mut(route_index.into());
        let nodes = route.nodes();
        let mut removed = vec![false; nodes.len()];

        for position in 1..nodes.len().saturating_sub(1) {
            if !bank.contains(nodes[position]) {
                continue;
            }

            removed[position] = true;
            match adjacent {
                AdjacentStation::None => {}
                AdjacentStation::Previous => {
                    if problem.is_station(nodes[position - 1]) {
                        removed[position - 1] = true;
                    }
                }
                AdjacentStation::Next => {
                    if problem.is_station(nodes[position + 1]) {
                        removed[position + 1] = true;
                    }
                }
            }
        }

        route.retain_positions(|position, _| !removed[position]);
    }
}
