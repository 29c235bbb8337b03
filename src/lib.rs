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

//! # Hotel Ledger
//!
//! This library provides an in-memory hotel reservation ledger: it tracks
//! rooms, users, and bookings, and enforces that a room is never
//! double-booked for overlapping date ranges while a user never books
//! beyond their balance.
//!
//! ## Core Components
//!
//! - [`Engine`]: Reservation engine managing the room/user registries and
//!   the booking transaction
//! - [`BookingLedger`]: Append-only store of confirmed bookings with
//!   conflict queries
//! - [`Room`], [`User`], [`Booking`]: the entities, with bookings carrying
//!   immutable snapshots of room and user fields at confirmation time
//! - [`ReservationError`]: Error types for reservation failures
//!
//! ## Example
//!
//! ```
//! use hotel_ledger_rs::{Engine, RoomNumber, RoomType, UserId};
//! use chrono::NaiveDate;
//!
//! let engine = Engine::new();
//!
//! engine.upsert_room(RoomNumber(1), RoomType::Standard, 1000).unwrap();
//! engine.upsert_user(UserId(1), 5000).unwrap();
//!
//! let booking = engine
//!     .book_room(
//!         UserId(1),
//!         RoomNumber(1),
//!         NaiveDate::from_ymd_opt(2026, 7, 7).unwrap(),
//!         NaiveDate::from_ymd_opt(2026, 7, 8).unwrap(),
//!     )
//!     .unwrap();
//!
//! assert_eq!(booking.total_amount(), 1000);
//! assert_eq!(engine.get_user(&UserId(1)).unwrap().balance(), 4000);
//! ```
//!
//! ## Thread Safety
//!
//! Registries are sharded maps, so unrelated rooms and users never
//! contend. The booking transaction serializes its check-then-commit tail
//! behind a lock, so two concurrent bookings can never both pass the
//! availability or affordability check against stale state.

mod base;
mod booking;
mod engine;
pub mod error;
mod ledger;
pub mod report;
mod room;
mod user;

pub use base::{BookingId, RoomNumber, UserId};
pub use booking::{Booking, BookingStatus, StayRange};
pub use engine::Engine;
pub use error::ReservationError;
pub use ledger::BookingLedger;
pub use room::{Room, RoomType};
pub use user::User;
