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

//! Append-only booking ledger with conflict queries.
//!
//! The ledger owns every confirmed [`Booking`] and the sequential id
//! counter that names them. Bookings are never mutated or removed once
//! appended; conflict detection is a scan over the confirmed bookings for
//! one room.

use crate::base::{BookingId, RoomNumber, UserId};
use crate::booking::{Booking, BookingStatus, StayRange};
use crate::room::RoomType;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug)]
struct LedgerData {
    /// Confirmed bookings in append order.
    bookings: Vec<Arc<Booking>>,
    /// Next booking id to hand out. Starts at 1 and only grows.
    next_id: u64,
}

/// Append-only store of confirmed bookings.
///
/// Interior state sits behind a single [`RwLock`], so reads (conflict
/// scans, listings) proceed concurrently while appends serialize. The
/// ledger is the sole writer of the booking id counter.
#[derive(Debug)]
pub struct BookingLedger {
    inner: RwLock<LedgerData>,
}

impl BookingLedger {
    /// Creates an empty ledger. The first booking gets id 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerData {
                bookings: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// True if any confirmed booking for `room_number` conflicts with
    /// `stay` under the touching-inclusive rule.
    pub fn has_conflict(&self, room_number: RoomNumber, stay: &StayRange) -> bool {
        let data = self.inner.read();
        data.bookings
            .iter()
            .filter(|booking| booking.room_number() == room_number)
            .filter(|booking| booking.status() == BookingStatus::Confirmed)
            .any(|booking| booking.has_date_conflict(stay))
    }

    /// Assigns the next sequential id and records a confirmed booking.
    ///
    /// Irreversible: there is no removal path. The caller (normally the
    /// engine's booking transaction) is responsible for having validated
    /// availability and debited the user before appending.
    pub fn append(
        &self,
        user_id: UserId,
        room_number: RoomNumber,
        stay: StayRange,
        room_type_at_booking: RoomType,
        room_price_at_booking: i64,
        user_balance_before_booking: i64,
    ) -> Arc<Booking> {
        let mut data = self.inner.write();
        let booking_id = BookingId(data.next_id);
        data.next_id += 1;

        let booking = Arc::new(Booking::confirm(
            booking_id,
            user_id,
            room_number,
            stay,
            room_type_at_booking,
            room_price_at_booking,
            user_balance_before_booking,
        ));
        data.bookings.push(Arc::clone(&booking));
        debug_assert_eq!(
            data.next_id as usize,
            data.bookings.len() + 1,
            "booking ids must stay dense and sequential"
        );
        booking
    }

    /// All bookings in append order.
    pub fn bookings(&self) -> Vec<Arc<Booking>> {
        self.inner.read().bookings.clone()
    }

    /// Number of recorded bookings.
    pub fn count(&self) -> usize {
        self.inner.read().bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().bookings.is_empty()
    }
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}
