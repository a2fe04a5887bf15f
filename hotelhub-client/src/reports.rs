//! Occupancy and revenue reports

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use shared::models::{
    Booking, ROOM_STATUS_AVAILABLE, ROOM_STATUS_MAINTENANCE, ROOM_STATUS_OCCUPIED, Room,
};

use crate::services::{BookingService, EntityService, RoomService};

/// Room counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoomStatusBreakdown {
    pub occupied: usize,
    pub available: usize,
    pub maintenance: usize,
    pub other: usize,
}

impl RoomStatusBreakdown {
    pub fn count(rooms: &[Room]) -> Self {
        rooms.iter().fold(Self::default(), |mut acc, room| {
            match room.status.as_deref() {
                Some(ROOM_STATUS_OCCUPIED) => acc.occupied += 1,
                Some(ROOM_STATUS_AVAILABLE) => acc.available += 1,
                Some(ROOM_STATUS_MAINTENANCE) => acc.maintenance += 1,
                _ => acc.other += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.occupied + self.available + self.maintenance + self.other
    }
}

/// Headline figures for the reports page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Sum over bookings that are not cancelled
    pub total_revenue: Decimal,
    /// Whole percent of rooms currently occupied
    pub occupancy_rate: u32,
    /// Revenue per non-cancelled booking, rounded to a whole amount
    pub average_room_rate: Decimal,
    pub total_bookings: usize,
    pub room_status: RoomStatusBreakdown,
}

impl ReportSummary {
    pub fn compute(bookings: &[Booking], rooms: &[Room]) -> Self {
        let billable: Vec<&Booking> = bookings.iter().filter(|b| !b.is_cancelled()).collect();
        let total_revenue: Decimal = billable
            .iter()
            .map(|b| b.total_amount.unwrap_or_default())
            .sum();

        let room_status = RoomStatusBreakdown::count(rooms);
        let occupancy_rate = if rooms.is_empty() {
            0
        } else {
            (room_status.occupied as f64 / rooms.len() as f64 * 100.0).round() as u32
        };

        let average_room_rate = if billable.is_empty() {
            Decimal::ZERO
        } else {
            (total_revenue / Decimal::from(billable.len()))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        };

        Self {
            total_revenue,
            occupancy_rate,
            average_room_rate,
            total_bookings: bookings.len(),
            room_status,
        }
    }

    /// Total revenue as a float, for display
    pub fn total_revenue_f64(&self) -> f64 {
        self.total_revenue.to_f64().unwrap_or_default()
    }
}

/// Loads the data behind [`ReportSummary`]
#[derive(Debug, Clone)]
pub struct Reports {
    bookings: BookingService,
    rooms: RoomService,
}

impl Reports {
    pub fn new(bookings: BookingService, rooms: RoomService) -> Self {
        Self { bookings, rooms }
    }

    /// Fetch bookings and rooms concurrently and summarize them
    pub async fn load(&self) -> ReportSummary {
        let (bookings, rooms) = tokio::join!(self.bookings.get_all(), self.rooms.get_all());
        tracing::debug!(bookings = bookings.len(), rooms = rooms.len(), "Computing report");
        ReportSummary::compute(&bookings, &rooms)
    }
}
