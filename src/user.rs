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

//! User entity with balance tracking.
//!
//! The debit path is the only guarded mutation: it refuses to drive the
//! balance below zero. An upsert, by contrast, overwrites the balance
//! verbatim, negative values included. The observed reference behavior has
//! exactly this asymmetry and both sides are covered by tests rather than
//! unified.

use crate::base::UserId;
use crate::error::ReservationError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A user account holding a balance in currency minor units.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    user_id: UserId,
    balance: i64,
    created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user, stamping `created_at` with the current time.
    ///
    /// The balance is stored as given, without a sign check.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidArgument`] if the user id is zero.
    pub fn new(user_id: UserId, balance: i64) -> Result<Self, ReservationError> {
        if user_id.0 == 0 {
            return Err(ReservationError::InvalidArgument(
                "user id must be positive",
            ));
        }
        Ok(Self {
            user_id,
            balance,
            created_at: Utc::now(),
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Current balance in currency minor units.
    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// True if `amount` can be debited without overdrawing.
    pub fn can_afford(&self, amount: i64) -> bool {
        self.balance >= amount
    }

    /// Overwrites the balance. Upsert path only; no sign check.
    pub(crate) fn set_balance(&mut self, balance: i64) {
        self.balance = balance;
    }

    /// Atomically checks affordability and decrements the balance.
    ///
    /// The check and the decrement happen under the caller's exclusive
    /// access to this `User` (a `&mut` borrow through the registry shard
    /// lock), so no partial debit is ever observable.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InsufficientFunds`] if the balance is
    /// smaller than `amount`. The balance is unchanged on failure.
    pub(crate) fn debit(&mut self, amount: i64) -> Result<(), ReservationError> {
        if !self.can_afford(amount) {
            return Err(ReservationError::InsufficientFunds);
        }
        self.balance -= amount;
        debug_assert!(
            self.balance >= 0 || amount <= 0,
            "debit drove a sufficient balance negative: {}",
            self.balance
        );
        Ok(())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User{{id={}, balance={}, createdAt={}}}",
            self.user_id, self.balance, self.created_at
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_rejects_zero_id() {
        let result = User::new(UserId(0), 1000);
        assert!(matches!(result, Err(ReservationError::InvalidArgument(_))));
    }

    #[test]
    fn new_user_accepts_negative_balance() {
        // Upsert-time asymmetry: only the debit path enforces non-negativity.
        let user = User::new(UserId(1), -1000).unwrap();
        assert_eq!(user.balance(), -1000);
    }

    #[test]
    fn debit_decrements_balance() {
        let mut user = User::new(UserId(1), 5000).unwrap();
        user.debit(1000).unwrap();
        assert_eq!(user.balance(), 4000);
    }

    #[test]
    fn debit_rejects_overdraw() {
        let mut user = User::new(UserId(1), 3000).unwrap();
        let result = user.debit(4000);
        assert_eq!(result, Err(ReservationError::InsufficientFunds));
        assert_eq!(user.balance(), 3000);
    }

    #[test]
    fn debit_to_exact_zero_succeeds() {
        let mut user = User::new(UserId(1), 2000).unwrap();
        user.debit(2000).unwrap();
        assert_eq!(user.balance(), 0);
    }

    #[test]
    fn debit_from_negative_balance_fails() {
        let mut user = User::new(UserId(1), -1000).unwrap();
        let result = user.debit(1);
        assert_eq!(result, Err(ReservationError::InsufficientFunds));
        assert_eq!(user.balance(), -1000);
    }

    #[test]
    fn set_balance_overwrites_verbatim() {
        let mut user = User::new(UserId(1), 100).unwrap();
        user.set_balance(-250);
        assert_eq!(user.balance(), -250);
    }
}
