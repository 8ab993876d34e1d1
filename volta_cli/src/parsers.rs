use jiff::SpanRelativeTo;
use volta_optimizer::problem::electric_vehicle_routing_problem::TravelTimeNoise;

pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_secs(seconds.abs()));
    }

    Err(String::from("Invalid duration"))
}

/// `P:F`, the probability of perturbing an arc and the deviation factor.
pub fn parse_travel_time_noise(input: &str) -> Result<TravelTimeNoise, String> {
    let (probability, factor) = input
        .split_once(':')
        .ok_or_else(|| String::from("Expected PROBABILITY:FACTOR"))?;

    let probability = probability
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("Invalid probability: {err}"))?;
    let deviation_factor = factor
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("Invalid factor: {err}"))?;

    if !(0.0..=1.0).contains(&probability) {
        return Err(format!("Probability {probability} is outside [0, 1]"));
    }

    if !(deviation_factor.is_finite() && deviation_factor >= 0.0) {
        return Err(format!(
            "Factor {deviation_factor} must be finite and non-negative"
        ));
    }

    Ok(TravelTimeNoise {
        probability,
        deviation_factor,
    })
}
