use serde::Serialize;

/// Global vehicle parameters shared by every route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FleetParams {
    /// Battery capacity (Q).
    pub battery_capacity: f64,

    /// Load capacity (C), `f64::INFINITY` for uncapacitated instances.
    pub load_capacity: f64,

    /// Time needed to recharge one unit of energy (g).
    pub inverse_recharge_rate: f64,

    /// Energy consumed per unit of distance (h).
    pub consumption_rate: f64,

    /// Average speed (v).
    pub speed: f64,
}

impl FleetParams {
    pub fn energy_for(&self, distance: f64) -> f64 {
        self.consumption_rate * distance
    }

    pub fn recharge_duration(&self, amount: f64) -> f64 {
        self.inverse_recharge_rate * amount
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.battery_capacity > 0.0
            && self.load_capacity > 0.0
            && self.inverse_recharge_rate >= 0.0
            && self.consumption_rate >= 0.0
            && self.speed > 0.0
            && self.battery_capacity.is_finite()
    }
}

impl Default for FleetParams {
    fn default() -> Self {
        FleetParams {
            battery_capacity: 100.0,
            load_capacity: f64::INFINITY,
            inverse_recharge_rate: 1.0,
            consumption_rate: 1.0,
            speed: 1.0,
        }
    }
}
