pub mod account;
pub mod bookmark;

pub use account::Account;
pub use bookmark::Bookmark;
