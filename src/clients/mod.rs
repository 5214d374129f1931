pub mod behavior_client;

pub use behavior_client::BehaviorClient;
