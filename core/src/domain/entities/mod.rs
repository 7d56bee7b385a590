//! Domain entities representing core business objects.

pub mod data_entry;
pub mod token;
pub mod user;


// Re-export commonly used types
pub use data_entry::{DataEntry, DataEntryInput, DataEntryView, UNKNOWN_OWNER};
pub use token::{Claims, RefreshToken, TokenPair};
pub use user::{NewUser, User};
