pub mod auth;
pub mod chores;
pub mod friends;
pub mod households;
pub mod invites;
pub mod points;

#[cfg(test)]
pub(crate) mod test_util {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    use shared::{CreateUserRequest, User};

    /// Fresh in-memory database with migrations applied. A single connection
    /// keeps every query on the same memory database.
    pub async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("failed to run migrations");

        pool
    }

    pub async fn create_user(pool: &SqlitePool, username: &str) -> User {
        super::auth::register_user(
            pool,
            &CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "password123".to_string(),
            },
        )
        .await
        .expect("failed to create test user")
    }

    pub async fn make_friends(pool: &SqlitePool, a: &User, b: &User) {
        let request = super::friends::send_friend_request(pool, &a.id, &b.username)
            .await
            .expect("failed to send friend request");
        super::friends::accept_friend_request(pool, &request.id, &b.id)
            .await
            .expect("failed to accept friend request");
    }
}
