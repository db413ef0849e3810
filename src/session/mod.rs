pub mod game;
pub mod input;
pub mod result;

pub use game::{LiveMetrics, Phase, Session, SessionSnapshot};
