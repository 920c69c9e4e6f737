// src/models/mod.rs

pub mod group_membership;
pub mod study_group;
pub mod user;
