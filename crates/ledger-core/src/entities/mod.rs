//! Domain entities - core business objects

mod alliance;
mod contribution;
mod member;

pub use alliance::Alliance;
pub use contribution::ContributionRecord;
pub use member::Member;
