pub mod award_ctx;
pub mod award_flow;

pub use award_ctx::BatchCtx;
pub use award_flow::{AwardFlow, BatchOutcome};
