mod replay_engine;

pub use replay_engine::ReplayEngine;
