mod report;

pub use report::{today, NewReport, Report};
