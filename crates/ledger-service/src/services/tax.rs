//! Tax service
//!
//! Stateless batch wrapper around a [`TaxSession`]: taxes a list of gross
//! amounts at one rate and optionally deposits some nets into resource counters.

use std::collections::BTreeMap;

use ledger_core::engine::TaxSession;
use ledger_core::Resources;
use tracing::{debug, instrument};

use crate::dto::{DepositResponse, TaxCalculationRequest, TaxCalculationResponse, TaxEntryResponse};

use super::error::{ServiceError, ServiceResult};

/// Tax service
#[derive(Debug, Default, Clone, Copy)]
pub struct TaxService;

impl TaxService {
    pub fn new() -> Self {
        Self
    }

    /// Split every entry into tax and net, then deposit the requested ones
    ///
    /// Deposit indices refer to the submitted entry order. Each deposited net
    /// is added to the named resource of `deposited_resources`. Totals cover
    /// the whole batch, deposited entries included.
    #[instrument(skip(self, request), fields(entries = request.entries.len()))]
    pub fn calculate(&self, request: TaxCalculationRequest) -> ServiceResult<TaxCalculationResponse> {
        let mut session = TaxSession::with_rate(request.rate)?;
        for gross in &request.entries {
            session.add_entry(*gross)?;
        }

        let mut to_deposit = BTreeMap::new();
        for deposit in &request.deposit {
            let index = deposit.index;
            if index >= session.len() {
                return Err(ServiceError::validation(format!(
                    "deposit index {index} is out of range for {} entries",
                    session.len()
                )));
            }
            if to_deposit.insert(index, deposit.kind).is_some() {
                return Err(ServiceError::validation(format!(
                    "deposit index {index} is listed more than once"
                )));
            }
        }

        let rate = session
            .rate()
            .map(|rate| rate.percent())
            .unwrap_or(request.rate);
        let entries: Vec<TaxEntryResponse> = session
            .entries()
            .iter()
            .enumerate()
            .map(TaxEntryResponse::from)
            .collect();
        let totals = session.totals().into();

        // Highest index first so earlier indices stay put
        let mut deposited = Vec::with_capacity(to_deposit.len());
        let mut deposited_resources = Resources::default();
        for (&index, &kind) in to_deposit.iter().rev() {
            let net = session.deposit(index)?;
            deposited_resources.deposit(kind, net)?;
            deposited.push(DepositResponse { index, kind, net });
        }
        deposited.reverse();

        debug!(deposited = deposited.len(), remaining = session.len(), "Tax batch calculated");

        Ok(TaxCalculationResponse {
            rate,
            entries,
            totals,
            deposited,
            deposited_resources,
        })
    }
}
