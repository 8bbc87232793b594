//! 도서 수명 주기 서비스.

use std::sync::Arc;

use library_core::{Availability, Book, BookStore, Identity, LibraryError, LibraryResult, NewBook};
use tracing::info;
use uuid::Uuid;

use crate::metrics::record_book_added;

pub const MSG_BOOK_NOT_FOUND: &str = "book not found";

/// 도서 서비스.
#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn BookStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// 도서를 `Available` 상태로 등록합니다. 호출자가 등록자로 기록됩니다.
    pub async fn add(&self, identity: &Identity, book_name: &str, author: &str) -> LibraryResult<Book> {
        let book = self
            .store
            .create(NewBook {
                book_name: book_name.trim().to_string(),
                author: author.trim().to_string(),
                owner_user_id: identity.user_id,
            })
            .await?;

        record_book_added();
        info!(book_id = %book.id, user_id = %identity.user_id, "도서 등록");
        Ok(book)
    }

    /// 상태와 관계없이 도서를 삭제합니다.
    pub async fn delete(&self, id: Uuid) -> LibraryResult<()> {
        if !self.store.delete(id).await? {
            return Err(LibraryError::NotFound(MSG_BOOK_NOT_FOUND.to_string()));
        }

        info!(book_id = %id, "도서 삭제");
        Ok(())
    }

    /// 도서를 대여 불가 상태로 바꿉니다.
    ///
    /// 이미 대여 불가 상태면 변경 없이 현재 레코드를 반환합니다.
    pub async fn mark_unavailable(&self, id: Uuid) -> LibraryResult<Book> {
        let mut book = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| LibraryError::NotFound(MSG_BOOK_NOT_FOUND.to_string()))?;

        if !book.is_available() {
            return Ok(book);
        }

        if !book.transition_to(Availability::Unavailable) {
            return Err(LibraryError::Validation(format!(
                "cannot change availability from {}",
                book.availability
            )));
        }

        let book = self
            .store
            .set_availability(id, book.availability)
            .await?
            .ok_or_else(|| LibraryError::NotFound(MSG_BOOK_NOT_FOUND.to_string()))?;

        info!(book_id = %id, "도서 대여 불가 처리");
        Ok(book)
    }

    /// 대여 가능한 도서 목록 (등록순).
    pub async fn list_available(&self) -> LibraryResult<Vec<Book>> {
        Ok(self.store.list_by_availability(Availability::Available).await?)
    }
}
