pub mod identity;
pub mod json;
pub mod request_id;

pub use identity::AuthenticatedUser;
pub use json::JsonBody;
pub use request_id::RequestId;
