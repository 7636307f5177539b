//! Settlement calculator: per-member and pairwise balances over the approved
//! subset of a room's ledger. Pure functions over a snapshot; amounts stay at
//! full decimal precision, rounding is left to the presentation layer.

use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use uuid::Uuid;

use crate::models::{Expense, Member};

/// Presentation hint for a member's net position. A zero net is reported as
/// settled, never coerced to a sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    /// Spent more than the equal share; is owed money
    Receives,
    /// Spent less than the equal share; owes money
    Pays,
    Settled,
}

impl std::fmt::Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Standing::Receives => "receives",
            Standing::Pays => "pays",
            Standing::Settled => "settled",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MemberBalance {
    pub member_id: Uuid,
    pub spent: Decimal,
    pub share: Decimal,
    pub net: Decimal,
}

impl MemberBalance {
    pub fn standing(&self) -> Standing {
        match self.net.cmp(&Decimal::ZERO) {
            Ordering::Greater => Standing::Receives,
            Ordering::Less => Standing::Pays,
            Ordering::Equal => Standing::Settled,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SettlementReport {
    pub total_approved: Decimal,
    pub equal_share: Decimal,
    pub balances: Vec<MemberBalance>,
}

/// Two-party comparison of raw spend totals over the shared approved set.
/// `net = spent_a - spent_b`: positive means `member_a` leads and `member_b`
/// owes `member_a` the amount; negative means the reverse. This is a simple
/// difference of totals, not a transfer-minimizing settlement.
#[derive(Clone, Debug, Serialize)]
pub struct PairwiseBalance {
    pub member_a: Uuid,
    pub member_b: Uuid,
    pub spent_a: Decimal,
    pub spent_b: Decimal,
    pub net: Decimal,
}

impl PairwiseBalance {
    /// The party owed money, if the pair is not settled.
    pub fn creditor(&self) -> Option<Uuid> {
        match self.net.cmp(&Decimal::ZERO) {
            Ordering::Greater => Some(self.member_a),
            Ordering::Less => Some(self.member_b),
            Ordering::Equal => None,
        }
    }

    /// The party that owes, if the pair is not settled.
    pub fn debtor(&self) -> Option<Uuid> {
        match self.net.cmp(&Decimal::ZERO) {
            Ordering::Greater => Some(self.member_b),
            Ordering::Less => Some(self.member_a),
            Ordering::Equal => None,
        }
    }

    pub fn amount_owed(&self) -> Decimal {
        self.net.abs()
    }
}

fn spent_by(expenses: &[Expense], member_id: Uuid) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.is_approved() && e.added_by == member_id)
        .map(|e| e.amount)
        .sum()
}

/// Computes the settlement report for a room snapshot.
///
/// `equal_share` is the approved total split evenly across all members, `0`
/// when there are no members (never a division by zero). `net` is positive
/// when the member is owed money. With a single member the share equals the
/// total and the net is zero by construction.
pub fn settle(expenses: &[Expense], members: &[Member]) -> SettlementReport {
    let total_approved: Decimal = expenses
        .iter()
        .filter(|e| e.is_approved())
        .map(|e| e.amount)
        .sum();

    let equal_share = if members.is_empty() {
        Decimal::ZERO
    } else {
        total_approved / Decimal::from(members.len() as u64)
    };

    let balances = members
        .iter()
        .map(|member| {
            let spent = spent_by(expenses, member.id);
            MemberBalance {
                member_id: member.id,
                spent,
                share: equal_share,
                net: spent - equal_share,
            }
        })
        .collect();

    SettlementReport {
        total_approved,
        equal_share,
        balances,
    }
}

/// Computes the two-party balance between `member_a` and `member_b`. An id
/// with no approved expenses (including one unknown to the room) simply
/// contributes zero; no error is raised.
pub fn pairwise(expenses: &[Expense], member_a: Uuid, member_b: Uuid) -> PairwiseBalance {
    let spent_a = spent_by(expenses, member_a);
    let spent_b = spent_by(expenses, member_b);

    PairwiseBalance {
        member_a,
        member_b,
        spent_a,
        spent_b,
        net: spent_a - spent_b,
    }
}

/// Approved expenses logged by either party, newest first. Expenses whose
/// date does not parse sort last.
pub fn shared_expenses(expenses: &[Expense], member_a: Uuid, member_b: Uuid) -> Vec<Expense> {
    let mut shared: Vec<Expense> = expenses
        .iter()
        .filter(|e| e.is_approved() && (e.added_by == member_a || e.added_by == member_b))
        .cloned()
        .collect();
    shared.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));
    shared
}
