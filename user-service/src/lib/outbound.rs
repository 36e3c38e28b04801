pub mod activity;
pub mod repositories;
