pub mod account {
    pub mod account_handlers;
    pub mod account_models;
}
pub mod profile {
    pub mod profile_handlers;
    pub mod profile_models;
}
pub mod routes;
pub mod study_group {
    pub mod study_group_handlers;
    pub mod study_group_models;
}
#[cfg(test)]
pub mod test_support;
