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

//! Reservation engine.
//!
//! The [`Engine`] is the central component: it owns the room and user
//! registries and the booking ledger, and runs the booking transaction
//! that ties them together.
//!
//! # Operations
//!
//! - **Upserts**: create a room/user on first sight, update it in place
//!   afterwards. Identity fields (`created_at`, the numeric key) survive
//!   updates.
//! - **Booking**: validate, resolve entities, check availability, compute
//!   cost, debit, append. All-or-nothing; any failure leaves every
//!   registry and the ledger untouched.
//!
//! # Thread Safety
//!
//! Registries are [`DashMap`]s, so unrelated rooms and users never contend.
//! The booking transaction's mutating tail (availability check, debit,
//! append) runs under a single transaction [`Mutex`] so that two racers
//! can never both pass the conflict or affordability check against the
//! same stale state.

use crate::base::{RoomNumber, UserId};
use crate::booking::{Booking, StayRange};
use crate::ledger::BookingLedger;
use crate::room::{Room, RoomType};
use crate::user::User;
use crate::ReservationError;
use chrono::NaiveDate;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use std::sync::Arc;

/// Reservation engine managing rooms, users, and bookings.
///
/// # Invariants
///
/// - Exactly one room per room number, one user per user id.
/// - A user's balance never goes negative through a debit (an upsert may
///   store a negative balance verbatim).
/// - A confirmed booking is never mutated or removed, and no two
///   confirmed bookings for one room have conflicting stays.
pub struct Engine {
    /// Rooms indexed by room number.
    rooms: DashMap<RoomNumber, Room>,
    /// Users indexed by user id.
    users: DashMap<UserId, User>,
    /// Append-only booking ledger, sole assigner of booking ids.
    ledger: BookingLedger,
    /// Serializes the check-then-commit tail of the booking transaction.
    booking_lock: Mutex<()>,
}

impl Engine {
    /// Creates a new engine with no rooms, users, or bookings.
    pub fn new() -> Self {
        Engine {
            rooms: DashMap::new(),
            users: DashMap::new(),
            ledger: BookingLedger::new(),
            booking_lock: Mutex::new(()),
        }
    }

    /// Creates a room or updates an existing one in place.
    ///
    /// An update overwrites type and price but preserves `created_at` and
    /// never touches bookings already recorded against the room.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidArgument`] if the room number is
    /// zero or the price is not positive. On failure the registry is left
    /// unchanged; no partial room is created.
    pub fn upsert_room(
        &self,
        number: RoomNumber,
        room_type: RoomType,
        price_per_night: i64,
    ) -> Result<(), ReservationError> {
        if number.0 == 0 {
            return Err(ReservationError::InvalidArgument(
                "room number must be positive",
            ));
        }
        match self.rooms.entry(number) {
            Entry::Occupied(mut entry) => entry.get_mut().update(room_type, price_per_night),
            Entry::Vacant(entry) => {
                // Validate before inserting so a bad price leaves no entry.
                let room = Room::new(number, room_type, price_per_night)?;
                entry.insert(room);
                Ok(())
            }
        }
    }

    /// Creates a user or overwrites an existing user's balance in place.
    ///
    /// A negative balance is accepted verbatim; only the debit path inside
    /// the booking transaction enforces non-negativity.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidArgument`] if the user id is zero.
    pub fn upsert_user(&self, user_id: UserId, balance: i64) -> Result<(), ReservationError> {
        if user_id.0 == 0 {
            return Err(ReservationError::InvalidArgument(
                "user id must be positive",
            ));
        }
        match self.users.entry(user_id) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().set_balance(balance);
                Ok(())
            }
            Entry::Vacant(entry) => {
                entry.insert(User::new(user_id, balance)?);
                Ok(())
            }
        }
    }

    /// Books a room for a user over a half-open date range.
    ///
    /// Executes, in order, short-circuiting on first failure:
    ///
    /// 1. structural validation (positive ids),
    /// 2. date ordering (`check_out` strictly after `check_in`),
    /// 3. entity resolution (user then room),
    /// 4. availability check against confirmed bookings,
    /// 5. cost computation (`nights * price`, exact integer arithmetic;
    ///    an overflowing product is rejected as `InvalidArgument`),
    /// 6. atomic debit,
    /// 7. ledger append.
    ///
    /// Steps 4-7 run under the transaction lock, so concurrent bookings
    /// for the same room or user serialize and can never double-commit
    /// against a stale conflict check or balance.
    ///
    /// On success the user's balance drops by exactly the booking's
    /// `total_amount` and the booking count grows by exactly one. On any
    /// failure nothing changes.
    ///
    /// # Errors
    ///
    /// - [`ReservationError::InvalidArgument`] - zero user id or room number.
    /// - [`ReservationError::InvalidDateRange`] - check-out not after check-in.
    /// - [`ReservationError::UserNotFound`] / [`ReservationError::RoomNotFound`].
    /// - [`ReservationError::RoomUnavailable`] - conflicting confirmed booking.
    /// - [`ReservationError::InsufficientFunds`] - cost exceeds balance.
    pub fn book_room(
        &self,
        user_id: UserId,
        room_number: RoomNumber,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Arc<Booking>, ReservationError> {
        if user_id.0 == 0 {
            return Err(ReservationError::InvalidArgument(
                "user id must be positive",
            ));
        }
        if room_number.0 == 0 {
            return Err(ReservationError::InvalidArgument(
                "room number must be positive",
            ));
        }
        let stay = StayRange::new(check_in, check_out)?;

        if !self.users.contains_key(&user_id) {
            return Err(ReservationError::UserNotFound);
        }

        let _guard = self.booking_lock.lock();

        // Snapshot the room fields under the lock so a racing upsert
        // cannot change the price between costing and commit.
        let (room_type, price_per_night) = {
            let room = self
                .rooms
                .get(&room_number)
                .ok_or(ReservationError::RoomNotFound)?;
            (room.room_type(), room.price_per_night())
        };

        if self.ledger.has_conflict(room_number, &stay) {
            return Err(ReservationError::RoomUnavailable);
        }

        let total_amount = stay
            .nights()
            .checked_mul(price_per_night)
            .ok_or(ReservationError::InvalidArgument(
                "booking cost overflows the currency range",
            ))?;

        // Debit and append are the last two steps, in immediate sequence.
        // The debit is check-and-decrement under the user's shard lock; if
        // it fails, no booking exists and no funds moved.
        let balance_before = {
            let mut user = self
                .users
                .get_mut(&user_id)
                .ok_or(ReservationError::UserNotFound)?;
            let balance_before = user.balance();
            user.debit(total_amount)?;
            balance_before
        };

        let booking = self.ledger.append(
            user_id,
            room_number,
            stay,
            room_type,
            price_per_night,
            balance_before,
        );
        Ok(booking)
    }

    /// Retrieves a room by number. Returns `None` if absent.
    pub fn get_room(
        &self,
        number: &RoomNumber,
    ) -> Option<dashmap::mapref::one::Ref<'_, RoomNumber, Room>> {
        self.rooms.get(number)
    }

    /// Retrieves a user by id. Returns `None` if absent.
    pub fn get_user(
        &self,
        user_id: &UserId,
    ) -> Option<dashmap::mapref::one::Ref<'_, UserId, User>> {
        self.users.get(user_id)
    }

    /// All rooms, most recently created first.
    pub fn list_rooms(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self.rooms.iter().map(|entry| entry.value().clone()).collect();
        rooms.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        rooms
    }

    /// All users, most recently created first.
    pub fn list_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        users
    }

    /// All bookings in the order they were confirmed.
    pub fn list_bookings(&self) -> Vec<Arc<Booking>> {
        self.ledger.bookings()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn booking_count(&self) -> usize {
        self.ledger.count()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
