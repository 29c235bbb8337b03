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

//! Room entity and room type classification.
//!
//! Rooms are owned by the engine's room registry and updated in place on
//! upsert. Historical bookings are unaffected by updates because every
//! [`Booking`](crate::Booking) carries its own snapshot of the room fields.

use crate::base::RoomNumber;
use crate::error::ReservationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Room category.
///
/// The textual labels (`standard` / `junior` / `suite`) are the external
/// presentation form and round-trip losslessly through serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "junior")]
    JuniorSuite,
    #[serde(rename = "suite")]
    MasterSuite,
}

impl RoomType {
    /// Returns the short textual label used by reports and CSV files.
    pub fn label(&self) -> &'static str {
        match self {
            RoomType::Standard => "standard",
            RoomType::JuniorSuite => "junior",
            RoomType::MasterSuite => "suite",
        }
    }

    /// Parses a textual label, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidArgument`] for unrecognized labels.
    pub fn from_label(label: &str) -> Result<Self, ReservationError> {
        match label.to_lowercase().as_str() {
            "standard" => Ok(RoomType::Standard),
            "junior" => Ok(RoomType::JuniorSuite),
            "suite" => Ok(RoomType::MasterSuite),
            _ => Err(ReservationError::InvalidArgument("unrecognized room type")),
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A hotel room.
///
/// The room number and creation timestamp are fixed at construction;
/// type and price are mutable through the registry's upsert path only.
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    number: RoomNumber,
    room_type: RoomType,
    price_per_night: i64,
    created_at: DateTime<Utc>,
}

impl Room {
    /// Creates a new room, stamping `created_at` with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidArgument`] if the room number is
    /// zero or the nightly price is not positive.
    pub fn new(
        number: RoomNumber,
        room_type: RoomType,
        price_per_night: i64,
    ) -> Result<Self, ReservationError> {
        if number.0 == 0 {
            return Err(ReservationError::InvalidArgument(
                "room number must be positive",
            ));
        }
        if price_per_night <= 0 {
            return Err(ReservationError::InvalidArgument(
                "price per night must be positive",
            ));
        }
        Ok(Self {
            number,
            room_type,
            price_per_night,
            created_at: Utc::now(),
        })
    }

    pub fn number(&self) -> RoomNumber {
        self.number
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    /// Nightly price in currency minor units.
    pub fn price_per_night(&self) -> i64 {
        self.price_per_night
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Overwrites type and price in place. Identity and `created_at` are
    /// preserved; recorded bookings keep their own snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidArgument`] if the new price is
    /// not positive. The room is left unchanged on failure.
    pub(crate) fn update(
        &mut self,
        room_type: RoomType,
        price_per_night: i64,
    ) -> Result<(), ReservationError> {
        if price_per_night <= 0 {
            return Err(ReservationError::InvalidArgument(
                "price per night must be positive",
            ));
        }
        self.room_type = room_type;
        self.price_per_night = price_per_night;
        Ok(())
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Room{{number={}, type={}, price={}/night, createdAt={}}}",
            self.number, self.room_type, self.price_per_night, self.created_at
        )
    }
}
