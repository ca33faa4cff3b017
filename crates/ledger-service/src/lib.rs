//! # ledger-service
//!
//! Application layer containing the ledger use cases, reports, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    ContributionService, ReportService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, TaxService,
};
