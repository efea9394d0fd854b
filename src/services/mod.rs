//! Business logic services
//!
//! Services sit between the HTTP handlers and the repositories: they own
//! input validation, the ownership-chain checks, and credential handling.

pub mod board;
pub mod board_list;
pub mod list_card;
pub mod password;
pub mod token;
pub mod user;

pub use board::{BoardService, BoardServiceError};
pub use board_list::{BoardListService, BoardListServiceError};
pub use list_card::{ListCardService, ListCardServiceError};
pub use token::TokenService;
pub use user::{UserService, UserServiceError};
