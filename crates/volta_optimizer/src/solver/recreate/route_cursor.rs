use crate::solver::solution::{
    route::Route, route_id::RouteIdx, working_solution::WorkingSolution,
};

/// Route currently receiving customers during a repair. The cursor only moves
/// forward, appending empty routes once it runs past the last one.
pub struct RouteCursor {
    route_id: RouteIdx,
    appended: usize,
    max_appended: usize,
}

impl RouteCursor {
    /// At most `max_appended` empty routes may be appended, every appended
    /// route is expected to receive at least one customer.
    pub fn new(solution: &mut WorkingSolution, max_appended: usize) -> Self {
        let mut cursor = RouteCursor {
            route_id: RouteIdx::new(0),
            appended: 0,
            max_appended,
        };

        if solution.num_routes() == 0 {
            cursor.route_id = cursor.append_route(solution);
        }

        cursor
    }

    pub fn route_id(&self) -> RouteIdx {
        self.route_id
    }

    pub fn appended(&self) -> usize {
        self.appended
    }

    pub fn is_last(&self, solution: &WorkingSolution) -> bool {
        self.route_id.get() + 1 >= solution.num_routes()
    }

    pub fn advance(&mut self, solution: &mut WorkingSolution) {
        self.route_id = if self.is_last(solution) {
            self.append_route(solution)
        } else {
            RouteIdx::new(self.route_id.get() + 1)
        };
    }

    fn append_route(&mut self, solution: &mut WorkingSolution) -> RouteIdx {
        self.appended += 1;
        assert!(
            self.appended <= self.max_appended,
            "appended {} empty routes for {} pending customers",
            self.appended,
            self.max_appended
        );

        let route = Route::empty(solution.problem());
        solution.push_route(route)
    }
}
