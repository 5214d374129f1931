pub mod award_service;
pub mod catalog_service;
pub mod warn_writer;

pub use award_service::{
    build_awards, pending_students, submit_all, validate_submission, AwardTally, CancelToken,
    FanOutReport,
};
pub use catalog_service::CatalogService;
pub use warn_writer::WarnWriter;
