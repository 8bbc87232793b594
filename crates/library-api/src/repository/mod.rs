//! 저장소 구현.
//!
//! [`library_core::UserStore`] / [`library_core::BookStore`]의 PostgreSQL 구현과
//! 메모리 구현을 제공합니다.

mod memory;
mod postgres;

pub use memory::{MemoryBookStore, MemoryUserStore};
pub use postgres::{Database, PgBookStore, PgUserStore};
