pub mod builder;
pub mod greedy;
pub mod human;
pub mod random;
pub mod registry;

pub use builder::BuilderBot;
pub use greedy::GreedyBot;
pub use human::HumanBot;
pub use random::RandomBot;
