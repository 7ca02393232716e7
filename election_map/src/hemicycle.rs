//! Geometry of the parliament hemicycle.
//!
//! The chamber is drawn as a half circle: 180° on the left, 0° on the right,
//! with one arc per party laid out from left to right.

use log::{debug, warn};

use crate::config::{ParliamentarySummary, PartySeats};
use crate::validate::ConsistencyWarning;

pub const CENTER_X: f64 = 200.0;
pub const CENTER_Y: f64 = 200.0;
pub const RADIUS: f64 = 150.0;

/// No party can span more than the half circle, so the minor arc is always
/// the one to draw.
pub const LARGE_ARC_FLAG: u8 = 0;

#[derive(PartialEq, Debug, Clone)]
pub struct ArcSegment {
    pub party: String,
    pub name: String,
    pub color: String,
    pub seats: u32,
    /// In degrees.
    pub start_angle: f64,
    /// In degrees, never larger than `start_angle`.
    pub end_angle: f64,
}

impl ArcSegment {
    /// Angular width of the segment, in degrees.
    pub fn span(&self) -> f64 {
        self.start_angle - self.end_angle
    }

    pub fn start_point(&self) -> (f64, f64) {
        point_at(self.start_angle)
    }

    pub fn end_point(&self) -> (f64, f64) {
        point_at(self.end_angle)
    }

    /// The SVG path drawing this segment, clockwise from its start angle.
    pub fn svg_path(&self) -> String {
        let (x1, y1) = self.start_point();
        let (x2, y2) = self.end_point();
        format!(
            "M {:.3} {:.3} A {} {} 0 {} 1 {:.3} {:.3}",
            x1, y1, RADIUS, RADIUS, LARGE_ARC_FLAG, x2, y2
        )
    }
}

/// The point of the circle at `angle` degrees. The y axis points down, as in SVG.
pub fn point_at(angle: f64) -> (f64, f64) {
    let rad = angle.to_radians();
    (CENTER_X + RADIUS * rad.cos(), CENTER_Y - RADIUS * rad.sin())
}

#[derive(PartialEq, Debug, Clone)]
pub struct Hemicycle {
    pub total_seats: u32,
    pub segments: Vec<ArcSegment>,
    /// Set when the seats of the parties do not add up to `total_seats`.
    pub warning: Option<ConsistencyWarning>,
}

/// Lays out one arc per party, in the given order, starting at 180°.
///
/// Each arc spans `seats / total_seats * 180` degrees. The arcs are contiguous.
/// When the seats add up to `total_seats` the last arc ends at 0° and the spans
/// sum to 180°; otherwise a warning is attached and logged. Seats in excess of
/// `total_seats` are squeezed at 0°, so the arcs never leave the half circle.
/// A zero `total_seats` gives empty arcs.
pub fn hemicycle_arc(parties: &[PartySeats], total_seats: u32) -> Hemicycle {
    let seat_sum: u64 = parties.iter().map(|p| p.seats as u64).sum();
    let warning = if seat_sum != total_seats as u64 {
        let w = ConsistencyWarning::SeatTotalMismatch {
            expected: total_seats,
            actual: seat_sum,
        };
        warn!("{}", w);
        Some(w)
    } else {
        None
    };

    // Angles are derived from the cumulative seat counts so that rounding
    // errors do not accumulate from one segment to the next.
    let angle_after = |cum: u64| -> f64 {
        if total_seats == 0 {
            180.0
        } else {
            (180.0 - (cum as f64) * 180.0 / (total_seats as f64)).max(0.0)
        }
    };

    let mut segments: Vec<ArcSegment> = Vec::with_capacity(parties.len());
    let mut cum: u64 = 0;
    for p in parties.iter() {
        let start_angle = angle_after(cum);
        cum += p.seats as u64;
        let end_angle = angle_after(cum);
        segments.push(ArcSegment {
            party: p.party.clone(),
            name: p.name.clone(),
            color: p.color.clone(),
            seats: p.seats,
            start_angle,
            end_angle,
        });
    }
    debug!("hemicycle_arc: {} segments", segments.len());
    Hemicycle {
        total_seats,
        segments,
        warning,
    }
}

/// The hemicycle of a parliament, largest party first.
///
/// Parties with the same number of seats keep their published order.
pub fn parliament_hemicycle(summary: &ParliamentarySummary) -> Hemicycle {
    let mut parties = summary.parties.clone();
    parties.sort_by(|a, b| b.seats.cmp(&a.seats));
    hemicycle_arc(&parties, summary.total_seats)
}
