use core::f32::consts::{PI, TAU};

use crate::Waypoint;

/// Returns the shortest signed rotation from angle `from` to angle `to`.
///
/// The result is in the range `(-π, π]`.
pub fn shortest_angle(from: f32, to: f32) -> f32 {
    let delta = libm::fmodf(to - from, TAU);
    if delta > PI {
        delta - TAU
    } else if delta <= -PI {
        delta + TAU
    } else {
        delta
    }
}

/// Straight-line path between two waypoints in `(theta, rho)` space.
///
/// This is an iterator over the waypoints of the path, from `start` to the
/// end inclusive. Points are computed on demand. Cloning an `Interpolation`
/// (or calling [Interpolation::restart]) replays the path from the start.
///
/// The turntable always takes the short way round: the angular travel is
/// normalized into `(-π, π]`, so the final waypoint's `theta` may differ
/// from the requested end by whole revolutions.
///
/// Theta (radians) and rho (unitless) are weighted equally when measuring
/// segment length. The metric is not physically uniform, but for small
/// resolutions it bounds the size of each move well enough.
#[derive(Debug, Clone)]
pub struct Interpolation {
    start: Waypoint,
    end_rho: f32,
    delta_theta: f32,
    delta_rho: f32,
    segments: u32,
    next: u32,
}
impl Interpolation {
    /// Creates the path from `start` to `end`.
    ///
    /// # Parameters
    ///
    /// - `start`: first waypoint of the path.
    /// - `end`: destination.
    /// - `resolution`: maximum segment length, must be positive.
    pub fn new(start: Waypoint, end: Waypoint, resolution: f32) -> Self {
        let delta_theta = shortest_angle(start.theta, end.theta);
        let delta_rho = end.rho - start.rho;
        let distance = libm::hypotf(delta_theta, delta_rho);
        // `as` saturates; NaN becomes 0 and is lifted to one segment.
        let segments = (libm::ceilf(distance / resolution) as u32).max(1);

        Self {
            start,
            end_rho: end.rho,
            delta_theta,
            delta_rho,
            segments,
            next: 0,
        }
    }

    /// Number of segments in the path. The path yields one more waypoint
    /// than this.
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// The last waypoint of the path.
    pub fn end(&self) -> Waypoint {
        self.point(self.segments)
    }

    /// Rewinds the path to its first waypoint.
    pub fn restart(&mut self) {
        self.next = 0;
    }

    fn point(&self, step: u32) -> Waypoint {
        let t = step as f32 / self.segments as f32;
        let rho = if step == self.segments {
            self.end_rho
        } else {
            self.start.rho + t * self.delta_rho
        };
        Waypoint::new(self.start.theta + t * self.delta_theta, rho)
    }
}

impl Iterator for Interpolation {
    type Item = Waypoint;

    fn next(&mut self) -> Option<Waypoint> {
        if self.next > self.segments {
            return None;
        }
        let point = self.point(self.next);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.segments + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Interpolation {}
