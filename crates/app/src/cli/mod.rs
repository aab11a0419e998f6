pub mod args;
pub mod op;
pub mod ops;

pub use ops::{Category, Cover, Daemon, Health, Init, Post, Version};
