pub mod identity;
pub mod response;
