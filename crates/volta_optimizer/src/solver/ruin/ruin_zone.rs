use rand::{Rng, seq::IndexedRandom};

use crate::{
    problem::{electric_vehicle_routing_problem::ElectricVehicleRoutingProblem, node::NodeIdx},
    solver::solution::{removal_bank::RemovalBank, working_solution::WorkingSolution},
};

use super::{
    ruin_context::RuinContext, ruin_solution::RuinSolution, ruin_strategy::AdjacentStation,
    ruin_utils::excise_customers,
};

/// Splits the bounding box of all nodes into a square grid and removes every
/// served customer of one non-empty cell. Cells are closed, a customer lying on
/// a border belongs to both neighbours.
pub struct RuinZone {
    pub adjacent: AdjacentStation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Cell {
    fn contains(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }
}

fn grid_cells(problem: &ElectricVehicleRoutingProblem, grid_size: usize) -> Vec<Cell> {
    let bounds = problem.bounds();
    let grid_size = grid_size.max(1);
    let width = bounds.width() / grid_size as f64;
    let height = bounds.height() / grid_size as f64;

    let mut cells = Vec::with_capacity(grid_size * grid_size);
    for column in 0..grid_size {
        for row in 0..grid_size {
            cells.push(Cell {
                min_x: bounds.min().x + column as f64 * width,
                max_x: bounds.min().x + (column + 1) as f64 * width,
                min_y: bounds.min().y + row as f64 * height,
                max_y: bounds.min().y + (row + 1) as f64 * height,
            });
        }
    }

    cells
}

impl RuinSolution for RuinZone {
    fn ruin_solution<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>) -> RemovalBank
    where
        R: Rng,
    {
        let problem = context.problem;
        let served = solution.served_customers();

        let zones = grid_cells(problem, context.params.zone_grid_size)
            .into_iter()
            .map(|cell| {
                served
                    .iter()
                    .copied()
                    .filter(|&customer| {
                        let location = problem.node(customer).location();
                        cell.contains(location.x(), location.y())
                    })
                    .collect::<Vec<NodeIdx>>()
            })
            .filter(|customers| !customers.is_empty())
            .collect::<Vec<_>>();

        let mut bank = RemovalBank::new(problem.num_nodes());
        if let Some(customers) = zones.choose(context.rng) {
            bank.extend(customers.iter().copied());
        }

        excise_customers(solution, &bank, self.adjacent);
        bank
    }
}
