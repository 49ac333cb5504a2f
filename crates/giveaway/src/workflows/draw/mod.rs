//! Seeded, reproducible winner selection and the records it leaves behind.

mod engine;
pub mod history;
pub mod seed;
pub mod session;

pub use engine::{pick_winner, DrawOutcome};
pub use history::{
    create_draw_result, create_draw_result_at, DrawHistory, DrawResult, DEFAULT_DRAWN_BY,
};
pub use seed::{generate_seed, shuffle, SeededStream};
pub use session::{DrawPhase, DrawSession, DrawSessionError};
