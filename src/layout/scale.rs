use super::AxisScale;

/// Breakpoints the axis ceiling and tick interval snap to. Values past the
/// table round up to the next multiple of `OVERFLOW_STEP`.
const BREAKPOINTS: [u32; 11] = [
    1000, 2500, 5000, 7500, 10000, 15000, 20000, 25000, 30000, 40000, 50000,
];
const OVERFLOW_STEP: u32 = 10000;

/// Round a declared maximum up to the nearest breakpoint. Idempotent.
pub fn round_up(value: u32) -> u32 {
    for breakpoint in BREAKPOINTS {
        if value <= breakpoint {
            return breakpoint;
        }
    }
    value.div_ceil(OVERFLOW_STEP) * OVERFLOW_STEP
}

/// Smallest breakpoint that keeps the interval marker count at or below
/// `max_ticks`.
fn tick_interval(ceiling: u32, max_ticks: u32) -> u32 {
    for step in BREAKPOINTS {
        if ceiling / step <= max_ticks {
            return step;
        }
    }
    BREAKPOINTS[0]
}

pub(super) fn compute_axis_scale(declared_max: u32, max_ticks: u32) -> AxisScale {
    let ceiling = round_up(declared_max);
    let interval = tick_interval(ceiling, max_ticks.max(1));
    let mut ticks = Vec::new();
    let mut value = interval;
    while value <= ceiling {
        ticks.push(value);
        value += interval;
    }
    AxisScale { ceiling, ticks }
}
