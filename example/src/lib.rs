mod data;
mod error;
mod user_api_client;

pub use data::user::{NewUser, User};
pub use error::Error;
pub use user_api_client::{UserApiClient, UserApiClientBuilder};
