pub mod theft_dto;

pub use theft_dto::{SubmitTheftDto, SubmitTheftResponseDto, TheftReportResponseDto};
