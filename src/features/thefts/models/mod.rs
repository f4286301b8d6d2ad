mod theft_report;

pub use theft_report::{NewTheftReport, TheftDetails, TheftReport};
