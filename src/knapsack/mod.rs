// Knapsack problem: random instances and their CQM formulation

pub mod builder;
pub mod instance;

pub use builder::{build_knapsack_cqm, CAPACITY_LABEL};
pub use instance::{GeneratorConfig, InstanceGenerator, Item, KnapsackInstance, KnapsackSelection};
