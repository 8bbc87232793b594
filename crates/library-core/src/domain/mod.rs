//! 도메인 모델.
//!
//! 사용자, 도서, 인증 주체 타입과 저장소 계약을 정의합니다.

mod book;
mod identity;
mod store;
mod user;

pub use book::{Availability, Book, NewBook, ParseAvailabilityError};
pub use identity::Identity;
pub use store::{BookStore, UserStore};
pub use user::{normalize_email, NewUser, User, UserChanges, UserView};
