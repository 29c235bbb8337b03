// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Stay date ranges and the immutable booking record.
//!
//! A stay is a half-open date range: nights run from check-in (inclusive)
//! to check-out (exclusive). The conflict rule is deliberately stricter
//! than plain half-open overlap: a checkout landing exactly on another
//! stay's check-in still counts as a conflict (see [`StayRange::conflicts_with`]).

use crate::base::{BookingId, RoomNumber, UserId};
use crate::error::ReservationError;
use crate::room::RoomType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

/// A validated half-open date range for a stay.
///
/// Invariant: `check_out` is strictly after `check_in`, so every range
/// covers at least one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayRange {
    /// Builds a stay range, enforcing date ordering.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidDateRange`] if `check_out` is not
    /// strictly after `check_in` (zero- and negative-night stays rejected).
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, ReservationError> {
        if check_out <= check_in {
            return Err(ReservationError::InvalidDateRange);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights covered, as whole days between the two dates.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// True if the two ranges conflict under the touching-inclusive rule:
    /// `[a,b)` and `[c,d)` conflict iff `b >= c && d >= a`.
    ///
    /// Back-to-back stays (one checking out the day the other checks in)
    /// therefore conflict.
    pub fn conflicts_with(&self, other: &StayRange) -> bool {
        self.check_out >= other.check_in && other.check_out >= self.check_in
    }
}

impl fmt::Display for StayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}

/// Booking lifecycle state.
///
/// Only `Confirmed` is reachable: there is no cancellation or refund path,
/// so a booking never leaves this state once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BookingStatus {
    #[serde(rename = "confirmed")]
    Confirmed,
}

/// An immutable booking record.
///
/// Holds plain numeric ids plus snapshot copies of the room and user
/// fields taken at confirmation time. Later upserts against the referenced
/// room or user never alter recorded history.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    booking_id: BookingId,
    user_id: UserId,
    room_number: RoomNumber,
    check_in: NaiveDate,
    check_out: NaiveDate,
    nights: i64,
    total_amount: i64,
    room_type_at_booking: RoomType,
    room_price_at_booking: i64,
    user_balance_before_booking: i64,
    status: BookingStatus,
    created_at: DateTime<Utc>,
}

impl Booking {
    /// Assembles a confirmed booking from the snapshot taken by the
    /// reservation transaction. Only the ledger constructs bookings.
    pub(crate) fn confirm(
        booking_id: BookingId,
        user_id: UserId,
        room_number: RoomNumber,
        stay: StayRange,
        room_type_at_booking: RoomType,
        room_price_at_booking: i64,
        user_balance_before_booking: i64,
    ) -> Self {
        Self {
            booking_id,
            user_id,
            room_number,
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            nights: stay.nights(),
            total_amount: stay.nights() * room_price_at_booking,
            room_type_at_booking,
            room_price_at_booking,
            user_balance_before_booking,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    pub fn booking_id(&self) -> BookingId {
        self.booking_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn room_number(&self) -> RoomNumber {
        self.room_number
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Whole nights covered by the stay.
    pub fn nights(&self) -> i64 {
        self.nights
    }

    /// Total cost debited at confirmation: `nights * price at booking time`.
    pub fn total_amount(&self) -> i64 {
        self.total_amount
    }

    pub fn room_type_at_booking(&self) -> RoomType {
        self.room_type_at_booking
    }

    pub fn room_price_at_booking(&self) -> i64 {
        self.room_price_at_booking
    }

    pub fn user_balance_before_booking(&self) -> i64 {
        self.user_balance_before_booking
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The stay this booking occupies.
    pub fn stay(&self) -> StayRange {
        StayRange {
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }

    /// True if this booking's stay conflicts with `stay`.
    pub fn has_date_conflict(&self, stay: &StayRange) -> bool {
        self.stay().conflicts_with(stay)
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Booking{{id={}, userId={}, roomNumber={}, checkIn={}, checkOut={}, nights={}, \
             roomType={}, pricePerNight={}, totalAmount={}, userBalanceBefore={}, status={:?}, createdAt={}}}",
            self.booking_id,
            self.user_id,
            self.room_number,
            self.check_in,
            self.check_out,
            self.nights,
            self.room_type_at_booking,
            self.room_price_at_booking,
            self.total_amount,
            self.user_balance_before_booking,
            self.status,
            self.created_at
        )
    }
}
