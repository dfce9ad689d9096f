pub mod levels;
pub mod mistakes;
pub mod question;
pub mod selector;
pub mod stats;
