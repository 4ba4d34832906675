//! APEX code tables for exposure parameters.
//!
//! The camera transports shutter speed, aperture, ISO and exposure
//! compensation as 8-bit codes on an APEX-like scale: eight code units per
//! stop, with third-stop steps at +3 and +5 inside each stop and half-stop
//! steps at +4. Each table maps the code space of one parameter at one step
//! granularity to its photographic value.

use std::sync::LazyLock;

/// Bidirectional code table for one exposure parameter.
///
/// Decoding is an exact lookup; codes outside the table return `None`.
/// Encoding snaps to the nearest tabulated value, preferring the lower value
/// on an exact midpoint, so out-of-range input clamps to the table endpoint.
pub struct ApexConverter {
    /// Sorted by value ascending.
    by_value: Vec<(u8, f64)>,
}

impl ApexConverter {
    fn new(table: &[(u8, f64)]) -> Self {
        let mut by_value = table.to_vec();
        by_value.sort_by(|a, b| a.1.total_cmp(&b.1));
        Self { by_value }
    }

    pub fn decode_u8(&self, code: u8) -> Option<f64> {
        self.by_value
            .iter()
            .find(|&&(c, _)| c == code)
            .map(|&(_, v)| v)
    }

    pub fn encode_u8(&self, value: f64) -> u8 {
        let mut best_code = 0u8;
        let mut best_dist = f64::INFINITY;
        for &(code, v) in &self.by_value {
            let dist = (v - value).abs();
            if dist < best_dist {
                best_code = code;
                best_dist = dist;
            }
        }
        best_code
    }
}

/// Builds a third-stop table: codes `base + 8s + {0, 3, 5}` over `values`
/// listed in wire-code order, with one trailing full-stop entry allowed.
fn third_stop_table(base: u8, values: &[f64]) -> Vec<(u8, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let code = base + 8 * (i / 3) as u8 + [0, 3, 5][i % 3];
            (code, v)
        })
        .collect()
}

/// Builds a half-stop table: codes `base + 4i` over `values`.
fn half_stop_table(base: u8, values: &[f64]) -> Vec<(u8, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (base + 4 * i as u8, v))
        .collect()
}

/// ISO speed in third stops, code 0 = ISO 6 up to code 112 = ISO 102400.
pub static ISO_SPEED: LazyLock<ApexConverter> = LazyLock::new(|| {
    ApexConverter::new(&third_stop_table(
        0,
        &[
            6.0, 8.0, 10.0, 12.0, 16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 64.0, 80.0, 100.0, 125.0,
            160.0, 200.0, 250.0, 320.0, 400.0, 500.0, 640.0, 800.0, 1000.0, 1250.0, 1600.0,
            2000.0, 2500.0, 3200.0, 4000.0, 5000.0, 6400.0, 8000.0, 10000.0, 12800.0, 16000.0,
            20000.0, 25600.0, 32000.0, 40000.0, 51200.0, 64000.0, 80000.0, 102400.0,
        ],
    ))
});

/// Shutter speed in seconds, half stops, code 16 = 30s down to code 160 =
/// 1/8000s.
pub static SHUTTER_SPEED_HALF: LazyLock<ApexConverter> = LazyLock::new(|| {
    ApexConverter::new(&half_stop_table(
        16,
        &[
            30.0,
            20.0,
            15.0,
            10.0,
            8.0,
            6.0,
            4.0,
            3.0,
            2.0,
            1.5,
            1.0,
            0.7,
            1.0 / 2.0,
            1.0 / 3.0,
            1.0 / 4.0,
            1.0 / 6.0,
            1.0 / 8.0,
            1.0 / 10.0,
            1.0 / 15.0,
            1.0 / 20.0,
            1.0 / 30.0,
            1.0 / 45.0,
            1.0 / 60.0,
            1.0 / 90.0,
            1.0 / 125.0,
            1.0 / 180.0,
            1.0 / 250.0,
            1.0 / 350.0,
            1.0 / 500.0,
            1.0 / 750.0,
            1.0 / 1000.0,
            1.0 / 1500.0,
            1.0 / 2000.0,
            1.0 / 3000.0,
            1.0 / 4000.0,
            1.0 / 6000.0,
            1.0 / 8000.0,
        ],
    ))
});

/// Shutter speed in seconds, third stops, same code endpoints as the
/// half-stop table.
pub static SHUTTER_SPEED_THIRD: LazyLock<ApexConverter> = LazyLock::new(|| {
    ApexConverter::new(&third_stop_table(
        16,
        &[
            30.0,
            25.0,
            20.0,
            15.0,
            13.0,
            10.0,
            8.0,
            6.0,
            5.0,
            4.0,
            3.2,
            2.5,
            2.0,
            1.6,
            1.3,
            1.0,
            0.8,
            0.6,
            0.5,
            0.4,
            0.3,
            1.0 / 4.0,
            1.0 / 5.0,
            1.0 / 6.0,
            1.0 / 8.0,
            1.0 / 10.0,
            1.0 / 13.0,
            1.0 / 15.0,
            1.0 / 20.0,
            1.0 / 25.0,
            1.0 / 30.0,
            1.0 / 40.0,
            1.0 / 50.0,
            1.0 / 60.0,
            1.0 / 80.0,
            1.0 / 100.0,
            1.0 / 125.0,
            1.0 / 160.0,
            1.0 / 200.0,
            1.0 / 250.0,
            1.0 / 320.0,
            1.0 / 400.0,
            1.0 / 500.0,
            1.0 / 640.0,
            1.0 / 800.0,
            1.0 / 1000.0,
            1.0 / 1250.0,
            1.0 / 1600.0,
            1.0 / 2000.0,
            1.0 / 2500.0,
            1.0 / 3200.0,
            1.0 / 4000.0,
            1.0 / 5000.0,
            1.0 / 6400.0,
            1.0 / 8000.0,
        ],
    ))
});

/// Aperture f-number in half stops, code 8 = f/1.0 up to code 88 = f/32.
pub static APERTURE_HALF: LazyLock<ApexConverter> = LazyLock::new(|| {
    ApexConverter::new(&half_stop_table(
        8,
        &[
            1.0, 1.2, 1.4, 1.7, 2.0, 2.4, 2.8, 3.3, 4.0, 4.8, 5.6, 6.7, 8.0, 9.5, 11.0, 13.0,
            16.0, 19.0, 22.0, 27.0, 32.0,
        ],
    ))
});

/// Aperture f-number in third stops, same code endpoints as the half-stop
/// table.
pub static APERTURE_THIRD: LazyLock<ApexConverter> = LazyLock::new(|| {
    ApexConverter::new(&third_stop_table(
        8,
        &[
            1.0, 1.1, 1.2, 1.4, 1.6, 1.8, 2.0, 2.2, 2.5, 2.8, 3.2, 3.5, 4.0, 4.5, 5.0, 5.6, 6.3,
            7.1, 8.0, 9.0, 10.0, 11.0, 13.0, 14.0, 16.0, 18.0, 20.0, 22.0, 25.0, 29.0, 32.0,
        ],
    ))
});

fn exp_comp_table(thirds: bool) -> Vec<(u8, f64)> {
    // Code is value * 8 in two's complement, with third steps landing on the
    // +3/+5 offsets of each stop.
    let mut table = vec![(0u8, 0.0)];
    let steps: &[(u8, f64)] = if thirds {
        &[(3, 1.0 / 3.0), (5, 2.0 / 3.0), (8, 1.0)]
    } else {
        &[(4, 0.5), (8, 1.0)]
    };
    let whole = if thirds { 6 } else { 3 };
    for stop in 0..whole {
        for &(off, frac) in steps {
            let code = 8 * stop + off;
            let value = f64::from(stop) + frac;
            table.push((code, value));
            table.push((code.wrapping_neg(), -value));
        }
    }
    table
}

/// Exposure compensation in half stops over ±3 EV.
pub static EXP_COMP_HALF: LazyLock<ApexConverter> =
    LazyLock::new(|| ApexConverter::new(&exp_comp_table(false)));

/// Exposure compensation in third stops over ±6 EV.
pub static EXP_COMP_THIRD: LazyLock<ApexConverter> =
    LazyLock::new(|| ApexConverter::new(&exp_comp_table(true)));
