pub mod check_in;
pub mod lecture;
pub mod outcome;

pub use check_in::{CheckInRecord, ScanResult};
pub use lecture::LectureWindow;
pub use outcome::{Outcome, OutcomeSummary};
