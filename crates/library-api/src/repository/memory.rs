//! 메모리 저장소.
//!
//! 테스트와 `database.url` 없이 실행할 때 사용합니다. 프로세스가 종료되면
//! 데이터는 사라집니다.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use library_core::{
    Availability, Book, BookStore, NewBook, NewUser, StoreError, StoreResult, User, UserChanges,
    UserStore,
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// 메모리 사용자 저장소.
///
/// 이메일 고유성 검사와 삽입이 같은 쓰기 잠금 안에서 일어나므로
/// 동시 가입 요청 중 하나만 성공합니다.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(users: &HashMap<Uuid, User>, email: &str, except: Option<Uuid>) -> bool {
    users
        .values()
        .any(|u| u.email == email && Some(u.id) != except)
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if email_taken(&users, &new_user.email, None) {
            return Err(StoreError::Duplicate(format!("users.email = {}", new_user.email)));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<User>> {
        let mut users = self.users.write().await;
        if !users.contains_key(&id) {
            return Ok(None);
        }
        if email_taken(&users, &changes.email, Some(id)) {
            return Err(StoreError::Duplicate(format!("users.email = {}", changes.email)));
        }

        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        user.name = changes.name;
        user.email = changes.email;
        user.password_hash = changes.password_hash;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// 메모리 도서 저장소.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<HashMap<Uuid, Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn create(&self, new_book: NewBook) -> StoreResult<Book> {
        let book = Book::create(new_book);
        self.books.write().await.insert(book.id, book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Book>> {
        Ok(self.books.read().await.get(&id).cloned())
    }

    async fn set_availability(
        &self,
        id: Uuid,
        availability: Availability,
    ) -> StoreResult<Option<Book>> {
        let mut books = self.books.write().await;
        Ok(books.get_mut(&id).map(|book| {
            book.availability = availability;
            book.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.books.write().await.remove(&id).is_some())
    }

    async fn list_by_availability(&self, availability: Availability) -> StoreResult<Vec<Book>> {
        let books = self.books.read().await;
        let mut matching: Vec<Book> = books
            .values()
            .filter(|b| b.availability == availability)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ada".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    fn new_book(name: &str) -> NewBook {
        NewBook {
            book_name: name.to_string(),
            author: "Knuth".to_string(),
            owner_user_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_user_create_and_find() {
        let store = MemoryUserStore::new();
        let user = store.create(new_user("a@x.com")).await.unwrap();

        assert_eq!(store.find_by_email("a@x.com").await.unwrap(), Some(user.clone()));
        assert_eq!(store.find_by_id(user.id).await.unwrap(), Some(user));
        assert!(store.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryUserStore::new();
        store.create(new_user("a@x.com")).await.unwrap();

        let result = store.create(new_user("a@x.com")).await;
        assert!(matches!(result, Err(StoreError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_concurrent_signup_single_winner() {
        let store = Arc::new(MemoryUserStore::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.create(new_user("race@x.com")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_update_checks_other_users_only() {
        let store = MemoryUserStore::new();
        let a = store.create(new_user("a@x.com")).await.unwrap();
        store.create(new_user("b@x.com")).await.unwrap();

        let keep_own = UserChanges {
            name: "Ada L".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "h2".to_string(),
        };
        let updated = store.update(a.id, keep_own).await.unwrap().unwrap();
        assert_eq!(updated.name, "Ada L");
        assert_eq!(updated.password_hash, "h2");

        let steal = UserChanges {
            name: "Ada".to_string(),
            email: "b@x.com".to_string(),
            password_hash: "h3".to_string(),
        };
        assert!(matches!(store.update(a.id, steal).await, Err(StoreError::Duplicate(_))));
        assert_eq!(store.find_by_id(a.id).await.unwrap().unwrap().email, "a@x.com");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_user() {
        let store = MemoryUserStore::new();
        let changes = UserChanges {
            name: "n".to_string(),
            email: "n@x.com".to_string(),
            password_hash: "h".to_string(),
        };

        assert!(store.update(Uuid::new_v4(), changes).await.unwrap().is_none());
        assert!(!store.delete(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_book_listing_by_availability() {
        let store = MemoryBookStore::new();
        let first = store.create(new_book("TAOCP")).await.unwrap();
        let second = store.create(new_book("SICP")).await.unwrap();

        let listed = store.list_by_availability(Availability::Available).await.unwrap();
        assert_eq!(listed.len(), 2);

        store
            .set_availability(first.id, Availability::Unavailable)
            .await
            .unwrap()
            .unwrap();

        let available = store.list_by_availability(Availability::Available).await.unwrap();
        assert_eq!(available, vec![second.clone()]);

        let unavailable = store.list_by_availability(Availability::Unavailable).await.unwrap();
        assert_eq!(unavailable.len(), 1);
        assert_eq!(unavailable[0].id, first.id);

        assert!(store.delete(first.id).await.unwrap());
        assert!(store.find_by_id(first.id).await.unwrap().is_none());
        assert!(store
            .set_availability(first.id, Availability::Unavailable)
            .await
            .unwrap()
            .is_none());
    }
}
