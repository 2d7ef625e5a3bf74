pub mod fixtures;
mod pipeline;
