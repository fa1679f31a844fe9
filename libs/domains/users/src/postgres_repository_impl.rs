use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement};
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, UpdateUser, User, UserStatus};
use crate::repository::UserRepository;

/// PostgreSQL implementation of UserRepository using SeaORM
///
/// Issues parameterized single-row statements only; the partial update is a
/// single `UPDATE ... SET col = COALESCE($n, col)` so absent fields never
/// leave the database.
#[derive(Clone)]
pub struct PostgresUserRepository {
    db: sea_orm::DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Helper struct for deserializing user rows from the database
#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    age: Option<i32>,
    status: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        // An unreadable status column surfaces as Unspecified and is caught
        // by the service's record validation
        let status = row.status.parse().unwrap_or(UserStatus::Unspecified);

        User {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            age: row.age,
            status,
        }
    }
}

fn storage_err(e: sea_orm::DbErr) -> UserError {
    UserError::Storage(format!("Database error: {}", e))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> UserResult<User> {
        let sql = r#"
            INSERT INTO users (id, first_name, last_name, email, phone, age, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
        "#;

        let id = Uuid::new_v4();
        let status = if user.status.is_specified() {
            user.status
        } else {
            UserStatus::Active
        };

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                id.into(),
                user.first_name.into(),
                user.last_name.into(),
                user.email.into(),
                user.phone.into(),
                user.age.into(),
                status.to_string().into(),
            ],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(storage_err)?
            .ok_or_else(|| UserError::Storage("Insert returned no row".to_string()))?;

        Ok(row.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let sql = "SELECT * FROM users WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(storage_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let sql = "SELECT * FROM users";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, []);

        let rows = UserRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(storage_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn update(&self, id: Uuid, update: UpdateUser) -> UserResult<Option<User>> {
        let sql = r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name  = COALESCE($3, last_name),
                email      = COALESCE($4, email),
                phone      = COALESCE($5, phone),
                age        = COALESCE($6, age),
                status     = COALESCE($7, status)
            WHERE id = $1
            RETURNING *
        "#;

        let status: Option<String> = update.status.as_str().map(str::to_string);

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                id.into(),
                update.first_name.into(),
                update.last_name.into(),
                update.email.into(),
                update.phone.into(),
                update.age.into(),
                status.into(),
            ],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(storage_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn delete(&self, id: Uuid) -> UserResult<()> {
        let sql = "DELETE FROM users WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        // Zero rows affected is fine, delete is idempotent
        self.db.execute_raw(stmt).await.map_err(storage_err)?;

        Ok(())
    }

    async fn close(&self) -> UserResult<()> {
        self.db.clone().close().await.map_err(storage_err)
    }
}
