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

//! Stay range and booking record public API integration tests.

use chrono::NaiveDate;
use hotel_ledger_rs::{
    BookingStatus, Engine, ReservationError, RoomNumber, RoomType, StayRange, UserId,
};

// === Helper Functions ===

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn stay(check_in: (i32, u32, u32), check_out: (i32, u32, u32)) -> StayRange {
    StayRange::new(
        date(check_in.0, check_in.1, check_in.2),
        date(check_out.0, check_out.1, check_out.2),
    )
    .unwrap()
}

// === StayRange Tests ===

#[test]
fn one_night_is_the_shortest_stay() {
    let range = stay((2026, 7, 7), (2026, 7, 8));
    assert_eq!(range.nights(), 1);

    let result = StayRange::new(date(2026, 7, 7), date(2026, 7, 7));
    assert_eq!(result, Err(ReservationError::InvalidDateRange));
}

#[test]
fn nights_span_month_boundaries() {
    let range = stay((2026, 6, 30), (2026, 7, 7));
    assert_eq!(range.nights(), 7);
}

#[test]
fn nights_span_year_boundaries() {
    let range = stay((2026, 12, 30), (2027, 1, 2));
    assert_eq!(range.nights(), 3);
}

#[test]
fn conflict_is_symmetric() {
    let a = stay((2026, 9, 1), (2026, 9, 5));
    let b = stay((2026, 9, 4), (2026, 9, 9));
    assert_eq!(a.conflicts_with(&b), b.conflicts_with(&a));
    assert!(a.conflicts_with(&b));
}

#[test]
fn identical_ranges_conflict() {
    let a = stay((2026, 9, 1), (2026, 9, 5));
    assert!(a.conflicts_with(&a));
}

#[test]
fn touching_boundary_conflicts_both_directions() {
    let earlier = stay((2026, 9, 1), (2026, 9, 5));
    let later = stay((2026, 9, 5), (2026, 9, 8));
    assert!(earlier.conflicts_with(&later));
    assert!(later.conflicts_with(&earlier));

    let disjoint = stay((2026, 9, 6), (2026, 9, 8));
    assert!(!earlier.conflicts_with(&disjoint));
    assert!(!disjoint.conflicts_with(&earlier));
}

// === Booking Record Tests (via the engine, the only public constructor path) ===

#[test]
fn booking_record_is_complete() {
    let engine = Engine::new();
    engine
        .upsert_room(RoomNumber(3), RoomType::MasterSuite, 3000)
        .unwrap();
    engine.upsert_user(UserId(2), 10_000).unwrap();

    let booking = engine
        .book_room(UserId(2), RoomNumber(3), date(2026, 7, 7), date(2026, 7, 8))
        .unwrap();

    assert_eq!(booking.user_id(), UserId(2));
    assert_eq!(booking.room_number(), RoomNumber(3));
    assert_eq!(booking.check_in(), date(2026, 7, 7));
    assert_eq!(booking.check_out(), date(2026, 7, 8));
    assert_eq!(booking.nights(), 1);
    assert_eq!(booking.total_amount(), 3000);
    assert_eq!(booking.room_type_at_booking(), RoomType::MasterSuite);
    assert_eq!(booking.room_price_at_booking(), 3000);
    assert_eq!(booking.user_balance_before_booking(), 10_000);
    assert_eq!(booking.status(), BookingStatus::Confirmed);
}

#[test]
fn booking_serialization_round_trips_room_type_label() {
    let engine = Engine::new();
    engine
        .upsert_room(RoomNumber(1), RoomType::JuniorSuite, 2000)
        .unwrap();
    engine.upsert_user(UserId(1), 10_000).unwrap();

    let booking = engine
        .book_room(UserId(1), RoomNumber(1), date(2026, 7, 1), date(2026, 7, 3))
        .unwrap();

    let json = serde_json::to_value(&*booking).unwrap();
    assert_eq!(json["room_type_at_booking"], "junior");
    assert_eq!(
        RoomType::from_label(json["room_type_at_booking"].as_str().unwrap()).unwrap(),
        RoomType::JuniorSuite
    );
}

#[test]
fn ledger_ids_are_dense_and_start_at_one() {
    let engine = Engine::new();
    engine
        .upsert_room(RoomNumber(1), RoomType::Standard, 100)
        .unwrap();
    engine.upsert_user(UserId(1), 10_000).unwrap();

    for day in 0..5u32 {
        engine
            .book_room(
                UserId(1),
                RoomNumber(1),
                date(2026, 3, 1 + day * 3),
                date(2026, 3, 2 + day * 3),
            )
            .unwrap();
    }

    let ids: Vec<u64> = engine
        .list_bookings()
        .iter()
        .map(|booking| booking.booking_id().0)
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn failed_bookings_do_not_consume_ids() {
    let engine = Engine::new();
    engine
        .upsert_room(RoomNumber(1), RoomType::Standard, 1000)
        .unwrap();
    engine.upsert_user(UserId(1), 10_000).unwrap();

    engine
        .book_room(UserId(1), RoomNumber(1), date(2026, 9, 1), date(2026, 9, 3))
        .unwrap();

    // A conflicting attempt must not advance the id counter.
    let _ = engine.book_room(UserId(1), RoomNumber(1), date(2026, 9, 2), date(2026, 9, 4));

    let next = engine
        .book_room(UserId(1), RoomNumber(1), date(2026, 9, 10), date(2026, 9, 11))
        .unwrap();
    assert_eq!(next.booking_id().0, 2);
}
