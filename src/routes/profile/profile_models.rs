use serde::Serialize;

#[derive(Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
}
