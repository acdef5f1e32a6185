pub mod handlers;
pub mod matching;
pub mod normalize;
pub mod profile;
pub mod prompts;
pub mod reconcile;
pub mod seed;
pub mod store;
pub mod tables;
pub mod taxonomy;
