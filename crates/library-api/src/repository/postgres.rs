//! PostgreSQL 저장소.
//!
//! 스키마는 `migrations/`에 있으며 부팅 시 [`Database::migrate`]로 적용됩니다.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use library_core::{
    Availability, Book, BookStore, DatabaseConfig, NewBook, NewUser, StoreError, StoreResult,
    User, UserChanges, UserStore,
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use tracing::info;
use uuid::Uuid;

/// 커넥션 풀 래퍼.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// 풀을 생성하고 연결을 확인합니다.
    pub async fn connect(url: &str, config: &DatabaseConfig) -> StoreResult<Self> {
        info!(max_connections = config.max_connections, "데이터베이스 연결 중...");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(url)
            .await?;

        info!("데이터베이스 연결 완료");
        Ok(Self { pool })
    }

    /// 마이그레이션을 실행합니다.
    pub async fn migrate(&self) -> StoreResult<()> {
        info!("마이그레이션 실행 중...");

        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(format!("마이그레이션 실패: {e}")))?;

        info!("마이그레이션 완료");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ==================== 사용자 ====================

/// PostgreSQL 사용자 저장소. 이메일 고유성은 `users.email` UNIQUE 제약이 보장합니다.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = $2, email = $3, password_hash = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// ==================== 도서 ====================

/// `books` 테이블 행. `availability`는 TEXT 컬럼입니다.
#[derive(Debug, FromRow)]
struct BookRow {
    id: Uuid,
    book_name: String,
    author: String,
    owner_user_id: Uuid,
    availability: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = StoreError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let availability = row
            .availability
            .parse::<Availability>()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Book {
            id: row.id,
            book_name: row.book_name,
            author: row.author,
            owner_user_id: row.owner_user_id,
            availability,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL 도서 저장소.
#[derive(Debug, Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const BOOK_COLUMNS: &str = "id, book_name, author, owner_user_id, availability, created_at";

#[async_trait]
impl BookStore for PgBookStore {
    async fn create(&self, new_book: NewBook) -> StoreResult<Book> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            r#"
            INSERT INTO books (id, book_name, author, owner_user_id, availability)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new_book.book_name)
        .bind(&new_book.author)
        .bind(new_book.owner_user_id)
        .bind(Availability::Available.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Book::try_from).transpose()
    }

    async fn set_availability(
        &self,
        id: Uuid,
        availability: Availability,
    ) -> StoreResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            "UPDATE books SET availability = $2 WHERE id = $1 RETURNING {BOOK_COLUMNS}"
        ))
        .bind(id)
        .bind(availability.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Book::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_availability(&self, availability: Availability) -> StoreResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE availability = $1 ORDER BY created_at, id"
        ))
        .bind(availability.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Book::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(availability: &str) -> BookRow {
        BookRow {
            id: Uuid::new_v4(),
            book_name: "TAOCP".to_string(),
            author: "Knuth".to_string(),
            owner_user_id: Uuid::new_v4(),
            availability: availability.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_book_row_conversion() {
        let book = Book::try_from(row("unavailable")).unwrap();
        assert_eq!(book.availability, Availability::Unavailable);

        // 이전 데이터 표기
        let legacy = Book::try_from(row("not available")).unwrap();
        assert_eq!(legacy.availability, Availability::Unavailable);
    }

    #[test]
    fn test_book_row_rejects_unknown_state() {
        assert!(matches!(
            Book::try_from(row("lost")),
            Err(StoreError::Backend(_))
        ));
    }
}
