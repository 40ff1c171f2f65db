use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::auth::{
  entities::Account, errors::AuthError, ports::AccountRepository, value_objects::Email,
};

/// PostgreSQL implementation of the AccountRepository trait
pub struct PostgresAccountRepository {
  pool: PgPool,
}

impl PostgresAccountRepository {
  /// Creates a new instance of PostgresAccountRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for the accounts table
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
  id: i64,
  email: String,
  password_hash: String,
  full_name: String,
  role: String,
  status: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
  last_login: Option<DateTime<Utc>>,
}

impl TryFrom<AccountRow> for Account {
  type Error = AuthError;

  fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
    Account::from_db(
      row.id,
      row.email,
      row.password_hash,
      row.full_name,
      row.role,
      row.status,
      row.created_at,
      row.updated_at,
      row.last_login,
    )
  }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
  async fn create(&self, account: Account) -> Result<Account, AuthError> {
    let row = sqlx::query_as::<_, AccountRow>(
      r#"
            INSERT INTO accounts (
                email,
                password_hash,
                full_name,
                role,
                status,
                created_at,
                updated_at,
                last_login
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id,
                email,
                password_hash,
                full_name,
                role,
                status,
                created_at,
                updated_at,
                last_login
            "#,
    )
    .bind(&account.email)
    .bind(&account.password_hash)
    .bind(&account.full_name)
    .bind(account.role.as_str())
    .bind(account.status.as_str())
    .bind(account.created_at)
    .bind(account.updated_at)
    .bind(account.last_login)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AuthError> {
    let result = sqlx::query_as::<_, AccountRow>(
      r#"
            SELECT
                id,
                email,
                password_hash,
                full_name,
                role,
                status,
                created_at,
                updated_at,
                last_login
            FROM accounts
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await;

    match result {
      Ok(Some(row)) => Ok(Some(row.try_into()?)),
      Ok(None) => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AuthError> {
    let result = sqlx::query_as::<_, AccountRow>(
      r#"
            SELECT
                id,
                email,
                password_hash,
                full_name,
                role,
                status,
                created_at,
                updated_at,
                last_login
            FROM accounts
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await;

    match result {
      Ok(Some(row)) => Ok(Some(row.try_into()?)),
      Ok(None) => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  async fn update(&self, account: Account) -> Result<Account, AuthError> {
    let result = sqlx::query_as::<_, AccountRow>(
      r#"
            UPDATE accounts
            SET
                email = $2,
                password_hash = $3,
                full_name = $4,
                role = $5,
                status = $6,
                updated_at = $7,
                last_login = $8
            WHERE id = $1
            RETURNING
                id,
                email,
                password_hash,
                full_name,
                role,
                status,
                created_at,
                updated_at,
                last_login
            "#,
    )
    .bind(account.id)
    .bind(&account.email)
    .bind(&account.password_hash)
    .bind(&account.full_name)
    .bind(account.role.as_str())
    .bind(account.status.as_str())
    .bind(account.updated_at)
    .bind(account.last_login)
    .fetch_one(&self.pool)
    .await;

    match result {
      Ok(row) => Ok(row.try_into()?),
      Err(sqlx::Error::RowNotFound) => Err(AuthError::NotFound),
      Err(e) => Err(e.into()),
    }
  }

  async fn delete(&self, id: i64) -> Result<(), AuthError> {
    let result = sqlx::query(
      r#"
            DELETE FROM accounts
            WHERE id = $1
            "#,
    )
    .bind(id)
    .execute(&self.pool)
    .await;

    match result {
      Ok(result) => {
        if result.rows_affected() == 0 {
          Err(AuthError::NotFound)
        } else {
          Ok(())
        }
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Account>, AuthError> {
    let rows = sqlx::query_as::<_, AccountRow>(
      r#"
            SELECT
                id,
                email,
                password_hash,
                full_name,
                role,
                status,
                created_at,
                updated_at,
                last_login
            FROM accounts
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(Account::try_from).collect()
  }

  async fn count(&self) -> Result<i64, AuthError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
      .fetch_one(&self.pool)
      .await?;

    Ok(total)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::{AccountRole, AccountStatus};
  use crate::domain::auth::errors::RepositoryError;
  use sqlx::postgres::PgPoolOptions;
  use testcontainers::ImageExt;
  use testcontainers_modules::postgres::Postgres;
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};

  async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
    // Start a PostgreSQL container
    let container = Postgres::default()
      .with_tag("16-alpine")
      .start()
      .await
      .expect("Failed to start postgres container");

    // Build connection string
    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(5432)
      .await
      .expect("Failed to get port");
    let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    // Connect to the database
    let pool = PgPoolOptions::new()
      .max_connections(5)
      .connect(&database_url)
      .await
      .expect("Failed to connect to test database");

    // Run migrations
    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("Failed to run migrations");

    (pool, container)
  }

  #[tokio::test]
  async fn test_create_account() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresAccountRepository::new(pool);

    let account = Account::new(
      "test@example.com".to_string(),
      "hashed_password".to_string(),
      "Test User".to_string(),
    );

    let created = repo.create(account).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.email, "test@example.com");
    assert_eq!(created.role, AccountRole::User);
    assert_eq!(created.status, AccountStatus::Active);
    assert!(created.last_login.is_none());
  }

  #[tokio::test]
  async fn test_find_by_email() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresAccountRepository::new(pool);

    let account = Account::new(
      "find@example.com".to_string(),
      "hashed_password".to_string(),
      "Find User".to_string(),
    );

    repo.create(account).await.unwrap();

    let email = Email::new("find@example.com".to_string()).unwrap();
    let found = repo.find_by_email(&email).await.unwrap();

    assert!(found.is_some());
    assert_eq!(found.unwrap().full_name, "Find User");
  }

  #[tokio::test]
  async fn test_duplicate_email() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresAccountRepository::new(pool);

    let first = Account::new(
      "duplicate@example.com".to_string(),
      "hashed_password".to_string(),
      "User One".to_string(),
    );

    let second = Account::new(
      "duplicate@example.com".to_string(),
      "hashed_password2".to_string(),
      "User Two".to_string(),
    );

    repo.create(first).await.unwrap();
    let result = repo.create(second).await;

    assert!(result.is_err());
    match result.unwrap_err() {
      AuthError::Repository(RepositoryError::DuplicateKey(_)) => {}
      other => panic!("Expected Repository(DuplicateKey) error, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_update_account() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresAccountRepository::new(pool);

    let account = Account::new(
      "update@example.com".to_string(),
      "hashed_password".to_string(),
      "Update User".to_string(),
    );

    let mut created = repo.create(account).await.unwrap();
    created.update_full_name("Updated Name".to_string());
    created.set_role(AccountRole::Admin);
    created.record_login();

    let updated = repo.update(created).await.unwrap();

    assert_eq!(updated.full_name, "Updated Name");
    assert_eq!(updated.role, AccountRole::Admin);
    assert!(updated.last_login.is_some());
  }

  #[tokio::test]
  async fn test_update_missing_account() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresAccountRepository::new(pool);

    let mut account = Account::new(
      "ghost@example.com".to_string(),
      "hashed_password".to_string(),
      "Ghost User".to_string(),
    );
    account.id = 424242;

    let result = repo.update(account).await;

    assert!(matches!(result, Err(AuthError::NotFound)));
  }

  #[tokio::test]
  async fn test_delete_account() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresAccountRepository::new(pool);

    let account = Account::new(
      "delete@example.com".to_string(),
      "hashed_password".to_string(),
      "Delete User".to_string(),
    );

    let created = repo.create(account).await.unwrap();
    repo.delete(created.id).await.unwrap();

    // The row is gone, not merely flagged
    let found = repo.find_by_id(created.id).await.unwrap();
    assert!(found.is_none());

    // Deleting again reports NotFound
    let result = repo.delete(created.id).await;
    assert!(matches!(result, Err(AuthError::NotFound)));
  }

  #[tokio::test]
  async fn test_deleted_email_is_reusable() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresAccountRepository::new(pool);

    let account = Account::new(
      "recycle@example.com".to_string(),
      "hashed_password".to_string(),
      "First Owner".to_string(),
    );

    let created = repo.create(account).await.unwrap();
    repo.delete(created.id).await.unwrap();

    let replacement = Account::new(
      "recycle@example.com".to_string(),
      "other_hash".to_string(),
      "Second Owner".to_string(),
    );

    let result = repo.create(replacement).await;
    assert!(result.is_ok());
  }

  #[tokio::test]
  async fn test_list_is_paged_and_ordered() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresAccountRepository::new(pool);

    for i in 0..15 {
      let account = Account::new(
        format!("user{:02}@example.com", i),
        "hashed_password".to_string(),
        format!("User {:02}", i),
      );
      repo.create(account).await.unwrap();
    }

    let first_page = repo.list(0, 10).await.unwrap();
    assert_eq!(first_page.len(), 10);

    let second_page = repo.list(10, 10).await.unwrap();
    assert_eq!(second_page.len(), 5);

    let mut ids: Vec<i64> = first_page.iter().chain(&second_page).map(|a| a.id).collect();
    let sorted = {
      let mut s = ids.clone();
      s.sort();
      s
    };
    assert_eq!(ids, sorted);

    ids.dedup();
    assert_eq!(ids.len(), 15);

    assert_eq!(repo.count().await.unwrap(), 15);
  }
}
