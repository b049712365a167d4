//! Business logic services
//!
//! Services load client records through the repositories and hand them to
//! the shared calculators.

pub mod assessment;
pub mod billing;
pub mod report;
pub mod snapshot;

pub use assessment::AssessmentService;
pub use billing::BillingService;
pub use report::ReportService;
pub use snapshot::{SnapshotScope, SnapshotService};
