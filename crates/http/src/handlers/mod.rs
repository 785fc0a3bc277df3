pub mod backfill;
pub mod conversations;
pub mod health;
pub mod search;
pub mod tasks;
