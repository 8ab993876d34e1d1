pub mod arc_table;
pub mod electric_vehicle_routing_problem;
pub mod fleet_params;
pub mod location;
pub mod node;
pub mod time_window;
