#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod code;
pub mod draft;
pub mod order;
pub mod question;
pub mod quiz;
pub mod score;
pub mod sheet;
pub mod stats;

pub use chrono::{DateTime, Utc};
pub use draft::Draft;
pub use order::Order;
pub use question::{Answer, Key, Question};
pub use quiz::{Attempt, Quiz, Submission};
pub use score::Score;
