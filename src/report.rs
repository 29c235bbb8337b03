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

//! Textual reporting over the engine's read-only projections.
//!
//! The engine itself never prints; rendering is this collaborator's job.
//! Listings run latest-to-oldest.

use crate::engine::Engine;
use std::io::{self, Write};

/// Writes all rooms and bookings, most recent first.
///
/// # Errors
///
/// Returns any I/O error from the underlying writer.
pub fn write_rooms_and_bookings<W: Write>(engine: &Engine, mut out: W) -> io::Result<()> {
    writeln!(out, "\n=== ALL ROOMS AND BOOKINGS ===")?;

    writeln!(out, "\n--- ROOMS (Latest to Oldest) ---")?;
    let rooms = engine.list_rooms();
    if rooms.is_empty() {
        writeln!(out, "No rooms found.")?;
    } else {
        for room in &rooms {
            writeln!(out, "{room}")?;
        }
    }

    writeln!(out, "\n--- BOOKINGS (Latest to Oldest) ---")?;
    let mut bookings = engine.list_bookings();
    if bookings.is_empty() {
        writeln!(out, "No bookings found.")?;
    } else {
        bookings.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        for booking in &bookings {
            writeln!(out, "{booking}")?;
        }
    }

    writeln!(out, "================================\n")?;
    Ok(())
}

/// Writes all users, most recent first.
///
/// # Errors
///
/// Returns any I/O error from the underlying writer.
pub fn write_users<W: Write>(engine: &Engine, mut out: W) -> io::Result<()> {
    writeln!(out, "\n=== ALL USERS ===")?;

    let users = engine.list_users();
    if users.is_empty() {
        writeln!(out, "No users found.")?;
    } else {
        for user in &users {
            writeln!(out, "{user}")?;
        }
    }

    writeln!(out, "==================\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{RoomNumber, UserId};
    use crate::room::RoomType;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_engine_reports_placeholders() {
        let engine = Engine::new();

        let mut out = Vec::new();
        write_rooms_and_bookings(&engine, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No rooms found."));
        assert!(text.contains("No bookings found."));

        let mut out = Vec::new();
        write_users(&engine, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No users found."));
    }

    #[test]
    fn report_includes_entities_and_bookings() {
        let engine = Engine::new();
        engine
            .upsert_room(RoomNumber(1), RoomType::Standard, 1000)
            .unwrap();
        engine.upsert_user(UserId(1), 5000).unwrap();
        engine
            .book_room(UserId(1), RoomNumber(1), date(2026, 7, 7), date(2026, 7, 8))
            .unwrap();

        let mut out = Vec::new();
        write_rooms_and_bookings(&engine, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Room{number=1, type=standard, price=1000/night"));
        assert!(text.contains("Booking{id=1, userId=1, roomNumber=1"));
        assert!(text.contains("totalAmount=1000"));

        let mut out = Vec::new();
        write_users(&engine, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("User{id=1, balance=4000"));
    }
}
