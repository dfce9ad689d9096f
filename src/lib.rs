//! Adaptive arithmetic drill engine: per-skill level tables, a question
//! generator, a streak-based leveling state machine, weighted skill selection
//! for mixed mode, and a bounded ledger of missed problems.
//!
//! All state transitions are synchronous pure functions returning new values;
//! randomness comes from a caller-supplied [`rand::rngs::SmallRng`] so seeded
//! tests replay exact sequences. The session driver owns timers, input and
//! rendering; the [`store`] module persists the state it hands back.

pub mod config;
pub mod engine;
pub mod session;
pub mod store;
