//! Booking Model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_helpers;
use super::{Entity, EntityDraft, Room};
use crate::request::SortType;
use crate::schema::{CREATED_ON_FIELD, FieldPair, Schema};

pub const BOOKING_STATUS_CONFIRMED: &str = "Confirmed";
pub const BOOKING_STATUS_CANCELLED: &str = "Cancelled";
pub const BOOKING_SOURCE_DIRECT: &str = "Direct";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

static BOOKING_FIELDS: &[FieldPair] = &[
    FieldPair::new("guest_id_c", "guestId"),
    FieldPair::new("guest_name_c", "guestName"),
    FieldPair::new("room_id_c", "roomId"),
    FieldPair::new("room_number_c", "roomNumber"),
    FieldPair::new("check_in_c", "checkIn"),
    FieldPair::new("check_out_c", "checkOut"),
    FieldPair::new("total_amount_c", "totalAmount"),
    FieldPair::new("status_c", "status"),
    FieldPair::new("special_requests_c", "specialRequests"),
    FieldPair::new("booking_source_c", "bookingSource"),
    FieldPair::new("payment_method_c", "paymentMethod"),
];

pub static BOOKING_SCHEMA: Schema = Schema {
    table: "booking_c",
    title: "Booking",
    label: "booking",
    plural: "bookings",
    fields: BOOKING_FIELDS,
    order_by: Some((CREATED_ON_FIELD, SortType::Desc)),
};

/// Booking record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "Id", with = "serde_helpers::record_id")]
    pub id: i64,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "guest_id_c", default, with = "serde_helpers::lookup_id", skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<i64>,
    #[serde(rename = "guest_name_c", default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(rename = "room_id_c", default, with = "serde_helpers::lookup_id", skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(rename = "room_number_c", default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(rename = "check_in_c", default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(rename = "check_out_c", default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    #[serde(rename = "total_amount_c", default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(rename = "status_c", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "special_requests_c", default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(rename = "booking_source_c", default, skip_serializing_if = "Option::is_none")]
    pub booking_source: Option<String>,
    #[serde(rename = "payment_method_c", default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl Booking {
    pub fn is_cancelled(&self) -> bool {
        self.status.as_deref() == Some(BOOKING_STATUS_CANCELLED)
    }
}

impl Entity for Booking {
    type Draft = BookingDraft;

    const SCHEMA: &'static Schema = &BOOKING_SCHEMA;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Create/update booking payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "guest_id_c", default, with = "serde_helpers::lookup_id", skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<i64>,
    #[serde(rename = "guest_name_c", default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(rename = "room_id_c", default, with = "serde_helpers::lookup_id", skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(rename = "room_number_c", default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(rename = "check_in_c", default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(rename = "check_out_c", default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    #[serde(rename = "total_amount_c", default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(rename = "status_c", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "special_requests_c", default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(rename = "booking_source_c", default, skip_serializing_if = "Option::is_none")]
    pub booking_source: Option<String>,
    #[serde(rename = "payment_method_c", default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

fn parse_stay_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.to_utc())
}

/// Nights between check-in and check-out, rounded up to whole days
///
/// Dates are `YYYY-MM-DD` or RFC 3339 timestamps; `None` if either does not
/// parse. A check-out before check-in yields a negative count.
pub fn stay_nights(check_in: &str, check_out: &str) -> Option<i64> {
    let seconds = parse_stay_date(check_out)?
        .signed_duration_since(parse_stay_date(check_in)?)
        .num_seconds();
    let nights = seconds.div_euclid(SECONDS_PER_DAY);
    Some(if seconds.rem_euclid(SECONDS_PER_DAY) > 0 { nights + 1 } else { nights })
}

/// Price of a stay in `room`: nightly rate times [`stay_nights`]
///
/// Zero when the room has no rate, a date does not parse or the stay is
/// shorter than one night.
pub fn quote_stay(room: &Room, check_in: &str, check_out: &str) -> Decimal {
    match (room.price_per_night, stay_nights(check_in, check_out)) {
        (Some(rate), Some(nights)) if nights > 0 => rate * Decimal::from(nights),
        _ => Decimal::ZERO,
    }
}

impl BookingDraft {
    /// Draft for a stay in `room`, priced with [`quote_stay`]
    pub fn for_stay(room: &Room, check_in: &str, check_out: &str) -> Self {
        Self {
            room_id: Some(room.id),
            room_number: room.number.clone(),
            check_in: Some(check_in.to_string()),
            check_out: Some(check_out.to_string()),
            total_amount: Some(quote_stay(room, check_in, check_out)),
            ..Default::default()
        }
    }
}

impl EntityDraft for BookingDraft {
    const SCHEMA: &'static Schema = &BOOKING_SCHEMA;

    fn apply_defaults(&mut self) {
        self.status.get_or_insert_with(|| BOOKING_STATUS_CONFIRMED.to_string());
        self.booking_source.get_or_insert_with(|| BOOKING_SOURCE_DIRECT.to_string());
    }

    // The guest name doubles as the booking's display name.
    fn display_name(&self) -> Option<String> {
        self.guest_name.clone().or_else(|| self.name.clone())
    }
}
