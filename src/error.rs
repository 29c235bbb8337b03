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

//! Error types for reservation processing.

use thiserror::Error;

/// Reservation processing errors.
///
/// All variants are recoverable: the caller may correct the triggering
/// condition and retry. Every failure is side-effect-free; no registry or
/// ledger state changes on an error return.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    /// Malformed input: non-positive id/number/price or an unrecognized
    /// room type label.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Check-out date is not strictly after check-in
    #[error("check-out date must be after check-in date")]
    InvalidDateRange,

    /// No user registered under the given id
    #[error("user not found")]
    UserNotFound,

    /// No room registered under the given number
    #[error("room not found")]
    RoomNotFound,

    /// The room has a confirmed booking conflicting with the requested dates
    #[error("room is not available for the specified period")]
    RoomUnavailable,

    /// The booking cost exceeds the user's balance
    #[error("insufficient balance")]
    InsufficientFunds,
}
