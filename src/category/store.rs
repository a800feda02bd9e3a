//! Defines the category store trait and its SQLite implementation.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    auth::UserId,
    category::{Category, CategoryId, CategoryName},
    db::CreateTable,
};

/// Creates, retrieves and deletes a user's categories.
///
/// Every operation is scoped to a single user, implementations must never
/// read or modify another user's categories.
pub trait CategoryStore {
    /// Create a new category owned by `user_id`.
    ///
    /// Returns an [Error::DuplicateCategoryName] if the user already has a category called `name`.
    fn create(&self, user_id: &UserId, name: CategoryName) -> Result<Category, Error>;

    /// Get all categories owned by `user_id` in the order they were created.
    fn get_by_user(&self, user_id: &UserId) -> Result<Vec<Category>, Error>;

    /// Delete the category with `category_id` if it is owned by `user_id`.
    ///
    /// Returns an [Error::DeleteMissingCategory] if there is no such category.
    fn delete(&self, user_id: &UserId, category_id: CategoryId) -> Result<(), Error>;
}

/// Creates, retrieves and deletes categories in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl CategoryStore for SQLiteCategoryStore {
    fn create(&self, user_id: &UserId, name: CategoryName) -> Result<Category, Error> {
        self.lock()?
            .prepare(
                "INSERT INTO category (user_id, name, created_at) VALUES (?1, ?2, ?3)
                 RETURNING id, user_id, name, created_at",
            )?
            .query_row(
                (user_id.as_str(), name.as_ref(), OffsetDateTime::now_utc()),
                map_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error {
                        code: _,
                        extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                    },
                    _,
                ) => Error::DuplicateCategoryName(name.to_string()),
                error => error.into(),
            })
    }

    fn get_by_user(&self, user_id: &UserId) -> Result<Vec<Category>, Error> {
        self.lock()?
            .prepare(
                "SELECT id, user_id, name, created_at FROM category
                 WHERE user_id = :user_id
                 ORDER BY id ASC;",
            )?
            .query_map(&[(":user_id", user_id.as_str())], map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    fn delete(&self, user_id: &UserId, category_id: CategoryId) -> Result<(), Error> {
        let rows_affected = self.lock()?.execute(
            "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
            (category_id, user_id.as_str()),
        )?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingCategory);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL CHECK (name <> ''),
                created_at TEXT NOT NULL,
                UNIQUE(user_id, name)
            );",
        )?;

        Ok(())
    }
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_user_id: String = row.get(1)?;
    let raw_name: String = row.get(2)?;
    let created_at = row.get(3)?;

    Ok(Category {
        id,
        user_id: UserId::new(&raw_user_id),
        name: CategoryName::new_unchecked(&raw_name),
        created_at,
    })
}

#[cfg(test)]
mod category_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        auth::UserId,
        category::{CategoryName, CategoryStore},
        db::initialize,
    };

    use super::SQLiteCategoryStore;

    fn get_test_store() -> SQLiteCategoryStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteCategoryStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn create_category_succeeds() {
        let store = get_test_store();
        let user_id = UserId::new("user_1");
        let name = CategoryName::new("Categorically a category").unwrap();

        let category = store.create(&user_id, name.clone()).unwrap();

        assert!(category.id > 0);
        assert_eq!(category.name, name);
        assert_eq!(category.user_id, user_id);
    }

    #[test]
    fn create_fails_on_duplicate_name_for_same_user() {
        let store = get_test_store();
        let user_id = UserId::new("user_1");
        store
            .create(&user_id, CategoryName::new_unchecked("Food"))
            .unwrap();

        let result = store.create(&user_id, CategoryName::new_unchecked("Food"));

        assert_eq!(result, Err(Error::DuplicateCategoryName("Food".to_owned())));
    }

    #[test]
    fn same_name_is_allowed_for_different_users() {
        let store = get_test_store();
        store
            .create(&UserId::new("alice"), CategoryName::new_unchecked("Food"))
            .unwrap();

        let result = store.create(&UserId::new("bob"), CategoryName::new_unchecked("Food"));

        assert!(result.is_ok());
    }

    #[test]
    fn get_by_user_returns_insertion_order() {
        let store = get_test_store();
        let user_id = UserId::new("user_1");
        let inserted = vec![
            store
                .create(&user_id, CategoryName::new_unchecked("Rent"))
                .unwrap(),
            store
                .create(&user_id, CategoryName::new_unchecked("Food"))
                .unwrap(),
            store
                .create(&user_id, CategoryName::new_unchecked("Bills"))
                .unwrap(),
        ];
        store
            .create(&UserId::new("user_2"), CategoryName::new_unchecked("Other"))
            .unwrap();

        let selected = store.get_by_user(&user_id).unwrap();

        assert_eq!(selected, inserted);
    }

    #[test]
    fn delete_category_succeeds() {
        let store = get_test_store();
        let user_id = UserId::new("user_1");
        let category = store
            .create(&user_id, CategoryName::new_unchecked("ToDelete"))
            .unwrap();

        let result = store.delete(&user_id, category.id);

        assert_eq!(result, Ok(()));
        assert_eq!(store.get_by_user(&user_id).unwrap(), vec![]);
    }

    #[test]
    fn delete_category_with_invalid_id_returns_not_found() {
        let store = get_test_store();

        let result = store.delete(&UserId::new("user_1"), 999999);

        assert_eq!(result, Err(Error::DeleteMissingCategory));
    }

    #[test]
    fn delete_category_owned_by_another_user_returns_not_found() {
        let store = get_test_store();
        let owner = UserId::new("alice");
        let category = store
            .create(&owner, CategoryName::new_unchecked("Food"))
            .unwrap();

        let result = store.delete(&UserId::new("mallory"), category.id);

        assert_eq!(result, Err(Error::DeleteMissingCategory));
        assert_eq!(store.get_by_user(&owner).unwrap(), vec![category]);
    }
}
