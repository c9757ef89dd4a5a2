//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Username uniqueness is enforced by the `users` primary key: the insert
//! itself reports the conflict, so concurrent signups cannot both succeed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{UserAccount, Username};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn map_insert_error(error: diesel::result::Error, username: &Username) -> UserPersistenceError {
    if is_unique_violation(&error) {
        debug!(%username, "user insert hit primary key conflict");
        return UserPersistenceError::duplicate_username(username.as_ref());
    }
    map_diesel_error(error)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(NewUserRow::from(account))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| map_insert_error(error, &account.username))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(UserRow::into_domain)
            .transpose()
            .map_err(UserPersistenceError::query)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for user repository error mapping.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn unique_violation_maps_to_duplicate_username() {
        let username = Username::new("ada").expect("valid username");
        let error = map_insert_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new("duplicate key value violates unique constraint".to_owned()),
            ),
            &username,
        );
        assert_eq!(error, UserPersistenceError::duplicate_username("ada"));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(error, UserPersistenceError::Connection { .. }));
        assert!(error.to_string().contains("connection refused"));
    }

    #[rstest]
    fn other_insert_failures_map_to_query_error() {
        let username = Username::new("ada").expect("valid username");
        let error = map_insert_error(DieselError::NotFound, &username);
        assert!(matches!(error, UserPersistenceError::Query { .. }));
    }
}
