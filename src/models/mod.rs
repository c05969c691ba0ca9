pub mod account;
pub mod movie;
pub mod order;
pub mod screening;
pub mod soda;
pub mod suggestion;

pub use account::Account;
pub use movie::Movie;
pub use order::{Order, SizeCounts};
pub use screening::Screening;
pub use soda::Soda;
pub use suggestion::Suggestion;
