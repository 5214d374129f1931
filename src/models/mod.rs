pub mod award;
pub mod batch;
pub mod category;
pub mod house;
pub mod loaders;
pub mod selection;
pub mod student;

pub use award::{AwardBatchPayload, PointAward};
pub use batch::AssignmentBatch;
pub use category::{clamp_multiplier, BehaviorCategory, MAX_MULTIPLIER, MIN_MULTIPLIER};
pub use house::House;
pub use loaders::{load_all_toml_files, load_toml_to_batch};
pub use selection::Selection;
pub use student::{Student, StudentFilter};
