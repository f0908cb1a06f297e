//! # chartkit
//!
//! Core chart primitives: scales, nice rounding, tick generation, path builders.
//! Implements Strategy pattern for flexible scale and rendering behaviors.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, TimeZone, Timelike, Utc};
use std::fmt::Write;

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Inverse scale (range to domain)
    fn invert(&self, value: f64) -> f64;

    /// Generate tick values
    fn ticks(&self, count: usize) -> Vec<f64>;
}

// ============================================================================
// TICK STEPS
// ============================================================================

/// Step between ticks for `[start, stop]` aiming at roughly `count` ticks:
/// a power of ten, widened by 10, 5 or 2 depending on how far the raw step
/// undershoots.
pub fn tick_step(start: f64, stop: f64, count: usize) -> Option<f64> {
    let span = (stop - start).abs();
    if !span.is_finite() || span == 0.0 || count == 0 {
        return None;
    }

    let m = count as f64;
    let mut step = 10.0_f64.powf((span / m).log10().floor());
    let err = m / span * step;

    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }

    Some(step)
}

/// Extend `[min, max]` outward to multiples of the tick step.
/// Zero-width or non-finite domains come back unchanged.
pub fn nice_linear(min: f64, max: f64, count: usize) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return (min, max);
    }
    let (lo, hi, reversed) = if min <= max {
        (min, max, false)
    } else {
        (max, min, true)
    };
    let Some(step) = tick_step(lo, hi, count) else {
        return (min, max);
    };

    let lo = (lo / step).floor() * step;
    let hi = (hi / step).ceil() * step;
    if reversed { (hi, lo) } else { (lo, hi) }
}

/// Evenly spaced ticks at multiples of the tick step inside `[min, max]`
pub fn linear_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let Some(step) = tick_step(lo, hi, count) else {
        return if lo.is_finite() { vec![lo] } else { Vec::new() };
    };

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;

    // Fractional steps divide by an integer to avoid accumulated float noise
    let inverse = (1.0 / step).round();
    (first..=last)
        .map(|i| {
            if step < 1.0 {
                i as f64 / inverse
            } else {
                i as f64 * step
            }
        })
        .collect()
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale)
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Round the domain outward to clean tick multiples
    pub fn nice(mut self, count: usize) -> Self {
        self.domain = nice_linear(self.domain.0, self.domain.1, count);
        self
    }

    /// Get domain bounds
    pub fn domain_bounds(&self) -> (f64, f64) {
        self.domain
    }

    /// Get range bounds
    pub fn range_bounds(&self) -> (f64, f64) {
        self.range
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (d_max - d_min).abs() < f64::EPSILON {
            return (r_min + r_max) / 2.0;
        }

        let mut normalized = (value - d_min) / (d_max - d_min);

        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }

        r_min + normalized * (r_max - r_min)
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) / 2.0;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        d_min + normalized * (d_max - d_min)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain.0, self.domain.1, count)
    }
}

// ============================================================================
// CALENDAR INTERVALS
// ============================================================================

const SECOND: f64 = 1e3;
const MINUTE: f64 = 6e4;
const HOUR: f64 = 3.6e6;
const DAY: f64 = 8.64e7;
const WEEK: f64 = 6.048e8;
const MONTH: f64 = 2.592e9;
const YEAR: f64 = 3.1536e10;

/// Calendar unit a time interval steps by (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// A calendar unit with a step; instants are aligned when the unit's field is
/// a multiple of the step (seconds 0/15/30/45, months Jan/Apr/Jul/Oct, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub unit: TimeUnit,
    pub step: u32,
}

/// Interval ladder with approximate durations, shortest first
const TIME_STEPS: [(f64, TimeUnit, u32); 18] = [
    (SECOND, TimeUnit::Second, 1),
    (5.0 * SECOND, TimeUnit::Second, 5),
    (15.0 * SECOND, TimeUnit::Second, 15),
    (30.0 * SECOND, TimeUnit::Second, 30),
    (MINUTE, TimeUnit::Minute, 1),
    (5.0 * MINUTE, TimeUnit::Minute, 5),
    (15.0 * MINUTE, TimeUnit::Minute, 15),
    (30.0 * MINUTE, TimeUnit::Minute, 30),
    (HOUR, TimeUnit::Hour, 1),
    (3.0 * HOUR, TimeUnit::Hour, 3),
    (6.0 * HOUR, TimeUnit::Hour, 6),
    (12.0 * HOUR, TimeUnit::Hour, 12),
    (DAY, TimeUnit::Day, 1),
    (2.0 * DAY, TimeUnit::Day, 2),
    (WEEK, TimeUnit::Week, 1),
    (MONTH, TimeUnit::Month, 1),
    (3.0 * MONTH, TimeUnit::Month, 3),
    (YEAR, TimeUnit::Year, 1),
];

/// Upper bound on generated ticks and alignment walks
const MAX_STEPS: usize = 10_000;

/// Tick spacing chosen for a time domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickInterval {
    /// Sub-second spans fall back to linear steps in milliseconds
    Millis(f64),
    Calendar(TimeInterval),
}

/// Pick the interval whose duration is closest to `span / count`
pub fn tick_interval(start_ms: f64, stop_ms: f64, count: usize) -> TickInterval {
    let target = (stop_ms - start_ms).abs() / count.max(1) as f64;
    let i = TIME_STEPS.partition_point(|(duration, _, _)| *duration <= target);

    if i == TIME_STEPS.len() {
        let step = tick_step(start_ms / YEAR, stop_ms / YEAR, count)
            .unwrap_or(1.0)
            .max(1.0);
        return TickInterval::Calendar(TimeInterval::new(TimeUnit::Year, step as u32));
    }
    if i == 0 {
        let step = tick_step(start_ms, stop_ms, count).unwrap_or(1.0).max(1.0);
        return TickInterval::Millis(step);
    }

    let i = if target / TIME_STEPS[i - 1].0 < TIME_STEPS[i].0 / target {
        i - 1
    } else {
        i
    };
    let (_, unit, step) = TIME_STEPS[i];
    TickInterval::Calendar(TimeInterval::new(unit, step))
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

impl TimeInterval {
    pub const fn new(unit: TimeUnit, step: u32) -> Self {
        Self { unit, step }
    }

    fn field(&self, dt: &DateTime<Utc>) -> i64 {
        match self.unit {
            TimeUnit::Second => dt.second() as i64,
            TimeUnit::Minute => dt.minute() as i64,
            TimeUnit::Hour => dt.hour() as i64,
            TimeUnit::Day => dt.day0() as i64,
            TimeUnit::Week => 0,
            TimeUnit::Month => dt.month0() as i64,
            TimeUnit::Year => dt.year() as i64,
        }
    }

    fn is_aligned(&self, dt: &DateTime<Utc>) -> bool {
        self.step <= 1 || self.field(dt).rem_euclid(self.step as i64) == 0
    }

    /// Start of the unit containing `dt`, ignoring the step
    fn unit_floor(&self, dt: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let date = dt.date_naive();
        let at = |h: u32, m: u32, s: u32| date.and_hms_opt(h, m, s).map(|n| n.and_utc());
        match self.unit {
            TimeUnit::Second => at(dt.hour(), dt.minute(), dt.second()),
            TimeUnit::Minute => at(dt.hour(), dt.minute(), 0),
            TimeUnit::Hour => at(dt.hour(), 0, 0),
            TimeUnit::Day => midnight(date),
            TimeUnit::Week => {
                let back = dt.weekday().num_days_from_sunday() as i64;
                midnight(date - Duration::days(back))
            }
            TimeUnit::Month => NaiveDate::from_ymd_opt(dt.year(), dt.month(), 1).and_then(midnight),
            TimeUnit::Year => NaiveDate::from_ymd_opt(dt.year(), 1, 1).and_then(midnight),
        }
    }

    /// Move `dt` by `n` whole units
    fn unit_offset(&self, dt: DateTime<Utc>, n: i64) -> Option<DateTime<Utc>> {
        let months = |count: i64| {
            let delta = Months::new(count.unsigned_abs() as u32);
            if count >= 0 {
                dt.checked_add_months(delta)
            } else {
                dt.checked_sub_months(delta)
            }
        };
        match self.unit {
            TimeUnit::Second => dt.checked_add_signed(Duration::seconds(n)),
            TimeUnit::Minute => dt.checked_add_signed(Duration::minutes(n)),
            TimeUnit::Hour => dt.checked_add_signed(Duration::hours(n)),
            TimeUnit::Day => dt.checked_add_signed(Duration::days(n)),
            TimeUnit::Week => dt.checked_add_signed(Duration::weeks(n)),
            TimeUnit::Month => months(n),
            TimeUnit::Year => months(n * 12),
        }
    }

    /// Latest aligned instant at or before `dt`
    pub fn floor(&self, dt: DateTime<Utc>) -> DateTime<Utc> {
        let Some(mut t) = self.unit_floor(dt) else {
            return dt;
        };
        for _ in 0..MAX_STEPS {
            if self.is_aligned(&t) {
                return t;
            }
            match self.unit_offset(t, -1) {
                Some(prev) => t = prev,
                None => break,
            }
        }
        t
    }

    /// Next aligned instant strictly after an aligned `dt`
    pub fn next(&self, dt: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let mut t = self.unit_offset(dt, 1)?;
        for _ in 0..MAX_STEPS {
            if self.is_aligned(&t) {
                return Some(t);
            }
            t = self.unit_offset(t, 1)?;
        }
        None
    }

    /// Earliest aligned instant at or after `dt`
    pub fn ceil(&self, dt: DateTime<Utc>) -> DateTime<Utc> {
        let floor = self.floor(dt);
        if floor == dt {
            return dt;
        }
        self.next(floor).unwrap_or(dt)
    }

    /// Aligned instants within `[start, stop]`
    pub fn range(&self, start: DateTime<Utc>, stop: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let mut out = Vec::new();
        let mut t = self.ceil(start);
        while t <= stop && out.len() < MAX_STEPS {
            out.push(t);
            match self.next(t) {
                Some(next) => t = next,
                None => break,
            }
        }
        out
    }
}

fn from_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(ms.round() as i64).single()
}

fn to_millis(dt: DateTime<Utc>) -> f64 {
    dt.timestamp_millis() as f64
}

// ============================================================================
// TIME SCALE
// ============================================================================

/// Time scale (maps timestamps to pixel positions)
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScale {
    domain: (i64, i64), // Unix timestamps in milliseconds
    range: (f64, f64),
}

impl TimeScale {
    pub fn new() -> Self {
        Self {
            domain: (0, 1),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: i64, max: i64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    /// Round the domain outward to the calendar interval suited to `count` ticks
    pub fn nice(mut self, count: usize) -> Self {
        let (lo, hi) = self.domain;
        if lo >= hi {
            return self;
        }
        let (lo_ms, hi_ms) = (lo as f64, hi as f64);
        let (nice_lo, nice_hi) = match tick_interval(lo_ms, hi_ms, count) {
            TickInterval::Millis(step) => ((lo_ms / step).floor() * step, (hi_ms / step).ceil() * step),
            TickInterval::Calendar(interval) => match (from_millis(lo_ms), from_millis(hi_ms)) {
                (Some(start), Some(stop)) => {
                    (to_millis(interval.floor(start)), to_millis(interval.ceil(stop)))
                }
                _ => (lo_ms, hi_ms),
            },
        };
        self.domain = (nice_lo as i64, nice_hi as i64);
        self
    }

    /// Get domain bounds (milliseconds)
    pub fn domain_bounds(&self) -> (i64, i64) {
        self.domain
    }

    pub fn range_bounds(&self) -> (f64, f64) {
        self.range
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for TimeScale {
    fn scale(&self, timestamp: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if d_max == d_min {
            return (r_min + r_max) / 2.0;
        }

        let normalized = (timestamp - d_min as f64) / (d_max - d_min) as f64;
        r_min + normalized * (r_max - r_min)
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) as f64 / 2.0;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        (d_min as f64 + normalized * (d_max - d_min) as f64).round()
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = (self.domain.0 as f64, self.domain.1 as f64);
        if lo >= hi {
            return vec![lo];
        }
        match tick_interval(lo, hi, count) {
            TickInterval::Millis(_) => linear_ticks(lo, hi, count),
            TickInterval::Calendar(interval) => match (from_millis(lo), from_millis(hi)) {
                (Some(start), Some(stop)) => interval
                    .range(start, stop)
                    .into_iter()
                    .map(to_millis)
                    .collect(),
                _ => Vec::new(),
            },
        }
    }
}

// ============================================================================
// STRATEGY PATTERN: Path Generator Trait
// ============================================================================

/// Strategy trait for path generation
pub trait PathGenerator: Send + Sync {
    fn generate(&self, points: &[(f64, f64)]) -> String;
}

/// Line path generator
#[derive(Debug, Clone, Default)]
pub struct LinePath;

impl PathGenerator for LinePath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let Some((&(x, y), rest)) = points.split_first() else {
            return String::new();
        };

        let mut builder = PathBuilder::new().move_to(x, y);
        for &(x, y) in rest {
            builder = builder.line_to(x, y);
        }
        builder.build()
    }
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    pub fn horizontal_to(mut self, x: f64) -> Self {
        let _ = write!(self.commands, "H{:.2}", x);
        self
    }

    pub fn vertical_to(mut self, y: f64) -> Self {
        let _ = write!(self.commands, "V{:.2}", y);
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

/// Generate line path (non-closed)
pub fn line_path(points: &[(f64, f64)]) -> String {
    LinePath.generate(points)
}

// ============================================================================
// TESTS
// ============================================================================
