/// Simplistic transformation from degrees, minutes and seconds-with-decimals
/// to degrees-with-decimals. No sanity check: Sign taken from degree-component,
/// minutes forced to unsigned by u16 type, but passing a negative value for
/// seconds leads to undefined behaviour.
pub fn dms_to_dd(d: i32, m: u16, s: f64) -> f64 {
    let sign = if d < 0 { -1. } else { 1. };
    sign * (d.abs() as f64 + (m as f64 + s / 60.) / 60.)
}

/// normalize arbitrary angles to [-π, π):
pub fn normalize_symmetric(angle: f64) -> f64 {
    use std::f64::consts::PI;
    let angle = (angle + PI).rem_euclid(2.0 * PI);
    angle - PI
}

// ----- Tests ---------------------------------------------------------------------
