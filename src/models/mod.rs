//! Data models
//!
//! Database entities for the task board hierarchy
//! (User -> Board -> BoardList -> ListCard) and their input types.

mod board;
mod board_list;
mod list_card;
mod user;

pub use board::Board;
pub use board_list::BoardList;
pub use list_card::{CardUpdate, ListCard};
pub use user::User;
