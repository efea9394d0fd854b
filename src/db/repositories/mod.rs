//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles the persisted operations for one entity.

pub mod board;
pub mod board_list;
pub mod list_card;
pub mod user;

pub use board::{BoardRepository, SqlxBoardRepository};
pub use board_list::{BoardListRepository, SqlxBoardListRepository};
pub use list_card::{ListCardRepository, SqlxListCardRepository};
pub use user::{SqlxUserRepository, UserRepository};
