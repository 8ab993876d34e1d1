use serde::Serialize;

/// Time and charge profile of a feasible route, one entry per position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteProfile {
    arrival_times: Vec<f64>,
    arrival_charge: Vec<f64>,
    departure_charge: Vec<f64>,
}

impl RouteProfile {
    pub(super) fn new(
        arrival_times: Vec<f64>,
        arrival_charge: Vec<f64>,
        departure_charge: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(arrival_times.len(), arrival_charge.len());
        debug_assert_eq!(arrival_times.len(), departure_charge.len());

        RouteProfile {
            arrival_times,
            arrival_charge,
            departure_charge,
        }
    }

    pub fn arrival_times(&self) -> &[f64] {
        &self.arrival_times
    }

    pub fn arrival_charge(&self) -> &[f64] {
        &self.arrival_charge
    }

    pub fn departure_charge(&self) -> &[f64] {
        &self.departure_charge
    }

    pub fn recharged_amount(&self, position: usize) -> f64 {
        self.departure_charge[position] - self.arrival_charge[position]
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.arrival_times, self.arrival_charge, self.departure_charge)
    }
}
