//! Business logic services
//!
//! This module contains the service layer implementations that handle
//! validation and orchestration of ledger operations.

pub mod context;
pub mod contribution;
pub mod error;
pub mod report;
pub mod tax;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use contribution::ContributionService;
pub use error::{ServiceError, ServiceResult};
pub use report::ReportService;
pub use tax::TaxService;
