pub mod capacity_constraint;
pub mod energy_constraint;
pub mod feasibility_oracle;
pub mod route_constraint;
pub mod route_profile;
pub mod schedule_constraint;
pub mod time_window_constraint;
