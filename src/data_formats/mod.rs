mod request;
mod response;
mod wrapper;

pub use request::*;
pub use response::*;
pub use wrapper::*;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct UserQueryParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "get_default_page")]
    pub page: u32,
    #[serde(default = "get_default_user_limit")]
    pub limit: u32,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ProjectQueryParams {
    #[serde(default)]
    pub search: Option<String>,
    /// "All" is a sentinel meaning "no tag filter".
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default = "get_default_page")]
    pub page: u32,
    #[serde(default = "get_default_project_limit")]
    pub limit: u32,
}

fn get_default_page() -> u32 {
    1
}

fn get_default_user_limit() -> u32 {
    10
}

fn get_default_project_limit() -> u32 {
    12
}
