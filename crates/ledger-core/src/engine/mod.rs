//! Ledger rules that do not touch storage: period sequencing, tax reduction
//! and aggregation.

mod aggregation;
mod sequencer;
mod tax;

pub use aggregation::{
    alliance_totals, leaderboard, member_totals, AllianceTotals, LeaderboardEntry, MemberTotals,
};
pub use sequencer::{next_eligible_period, CreateDecision, PeriodSequencer, DEFAULT_PERIOD_CEILING};
pub use tax::{TaxEntry, TaxRate, TaxSession, TaxTotals};
