//! DynamoDB implementation of the profile store.

mod item;
mod profile_store;
mod session;

pub use item::{item_to_profile, profile_to_item, ATTR_AGE, ATTR_EMAIL, ATTR_ID, ATTR_NAME};
pub use profile_store::DynamoProfileStore;
pub use session::DynamoSession;
