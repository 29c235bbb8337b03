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

use chrono::NaiveDate;
use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use hotel_ledger_rs::{report, Engine, RoomNumber, RoomType, UserId};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;

/// Hotel Ledger - Process reservation command CSV files
///
/// Reads commands from a CSV file and outputs the resulting bookings to
/// stdout, or a human-readable report with --report.
#[derive(Parser, Debug)]
#[command(name = "hotel-ledger-rs")]
#[command(about = "An in-memory hotel reservation ledger driven by command CSVs", long_about = None)]
struct Args {
    /// Path to CSV file with commands
    ///
    /// Expected format: op,user,room,room_type,price,balance,check_in,check_out
    /// Example: cargo run -- commands.csv > bookings.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print a textual report of rooms, bookings, and users instead of
    /// the bookings CSV
    #[arg(long)]
    report: bool,
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Open input file
    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    // Apply commands from CSV
    let engine = match process_commands(BufReader::new(file)) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error processing commands: {}", e);
            process::exit(1);
        }
    };

    // Write results to stdout
    let result = if args.report {
        write_report(&engine, std::io::stdout())
    } else {
        write_bookings(&engine, std::io::stdout()).map_err(std::io::Error::other)
    };
    if let Err(e) = result {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Raw CSV record matching the input format.
///
/// Fields: `op, user, room, room_type, price, balance, check_in, check_out`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    op: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    user: Option<u32>,
    #[serde(deserialize_with = "csv::invalid_option")]
    room: Option<u32>,
    room_type: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    price: Option<i64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    balance: Option<i64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    check_in: Option<NaiveDate>,
    #[serde(deserialize_with = "csv::invalid_option")]
    check_out: Option<NaiveDate>,
}

/// A parsed reservation command.
#[derive(Debug)]
enum Command {
    SetRoom {
        number: RoomNumber,
        room_type: RoomType,
        price: i64,
    },
    SetUser {
        user_id: UserId,
        balance: i64,
    },
    Book {
        user_id: UserId,
        room: RoomNumber,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

impl CsvRecord {
    /// Converts a CSV record to a command.
    ///
    /// Returns `None` for unknown ops or missing required fields.
    fn into_command(self) -> Option<Command> {
        match self.op.to_lowercase().as_str() {
            "room" => Some(Command::SetRoom {
                number: RoomNumber(self.room?),
                room_type: RoomType::from_label(self.room_type.as_deref()?).ok()?,
                price: self.price?,
            }),
            "user" => Some(Command::SetUser {
                user_id: UserId(self.user?),
                balance: self.balance?,
            }),
            "book" => Some(Command::Book {
                user_id: UserId(self.user?),
                room: RoomNumber(self.room?),
                check_in: self.check_in?,
                check_out: self.check_out?,
            }),
            _ => None,
        }
    }
}

/// Applies a command against the engine.
fn apply(engine: &Engine, command: Command) -> Result<(), hotel_ledger_rs::ReservationError> {
    match command {
        Command::SetRoom {
            number,
            room_type,
            price,
        } => engine.upsert_room(number, room_type, price),
        Command::SetUser { user_id, balance } => engine.upsert_user(user_id, balance),
        Command::Book {
            user_id,
            room,
            check_in,
            check_out,
        } => engine.book_room(user_id, room, check_in, check_out).map(|_| ()),
    }
}

/// Process commands from a CSV reader.
///
/// Streaming parse, so arbitrarily large command files never load fully
/// into memory. Malformed rows and failed commands are skipped; a failed
/// booking (say, `RoomUnavailable`) does not stop processing.
///
/// # CSV Format
///
/// Expected columns: `op, user, room, room_type, price, balance, check_in, check_out`
/// - `op`: Command (room, user, book)
/// - `user`: User id (room and book commands)
/// - `room`: Room number (room and book commands)
/// - `room_type`: Room type label (standard, junior, suite)
/// - `price`: Nightly price in minor units (room command)
/// - `balance`: Account balance in minor units (user command)
/// - `check_in` / `check_out`: ISO dates (book command)
///
/// # Example
///
/// ```csv
/// op,user,room,room_type,price,balance,check_in,check_out
/// room,,1,standard,1000,,,
/// user,1,,,,5000,,
/// book,1,1,,,,2026-07-07,2026-07-08
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the CSV structure is invalid.
/// Individual command errors are logged in debug mode but don't stop processing.
pub fn process_commands<R: Read>(reader: R) -> Result<Engine, csv::Error> {
    let engine = Engine::new();

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All) // Handle whitespace in fields like " book "
        .flexible(true) // Allow trailing empty fields
        .has_headers(true) // Skip first row as header
        .from_reader(reader);

    for result in rdr.deserialize::<CsvRecord>() {
        match result {
            Ok(record) => {
                // Convert CSV record to a command
                let Some(command) = record.into_command() else {
                    #[cfg(debug_assertions)]
                    eprintln!("Skipping invalid command record");
                    continue;
                };

                // Apply command, ignoring errors (silent failure)
                if let Err(_e) = apply(&engine, command) {
                    #[cfg(debug_assertions)]
                    eprintln!("Skipping failed command: {}", _e);
                }
            }
            Err(e) => {
                // Skip malformed rows
                #[cfg(debug_assertions)]
                eprintln!("Skipping malformed row: {}", e);
                continue;
            }
        }
    }

    Ok(engine)
}

/// Write confirmed bookings to a CSV writer.
///
/// Every snapshot field of the booking is included, so history survives
/// later room or user edits.
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_bookings<W: Write>(engine: &Engine, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for booking in engine.list_bookings() {
        wtr.serialize(&*booking)?;
    }

    // Flush to ensure all data is written
    wtr.flush()?;
    Ok(())
}

/// Write the textual report: rooms and bookings, then users.
fn write_report<W: Write>(engine: &Engine, mut writer: W) -> std::io::Result<()> {
    report::write_rooms_and_bookings(engine, &mut writer)?;
    report::write_users(engine, &mut writer)
}
