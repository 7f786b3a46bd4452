use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqliteRow};

use crate::core::error::Error;
use crate::types::{Claims, User};

const BCRYPT_COST: u32 = 12;

#[derive(Clone)]
pub struct UserController {
    pool: SqlitePool,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl std::fmt::Debug for UserController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserController")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl UserController {
    pub fn new(pool: SqlitePool, secret: &str, token_ttl: Duration) -> Self {
        Self {
            pool,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            // Pinned to HS256; the algorithm declared in a token header is
            // not trusted.
            validation: Validation::new(Algorithm::HS256),
            token_ttl,
        }
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        match sqlx::query(
            "SELECT
                id,
                username,
                email,
                password_hash,
                is_active,
                created_at
            FROM users
            WHERE username = $1;",
        )
        .bind(username)
        .map(map_user)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(e) => Err(Error::Sql(e)),
        }
    }

    /// Provisions an account. There is no public registration route; this is
    /// the seeding/operations path.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, Error> {
        let password_hash = self.hash_password(password).await?;

        match sqlx::query(
            "INSERT INTO users (username, email, password_hash, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id,
                username,
                email,
                password_hash,
                is_active,
                created_at;",
        )
        .bind(username)
        .bind(email)
        .bind(&password_hash)
        .bind(true)
        .bind(Utc::now())
        .map(map_user)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::UserExists)
            }
            Err(e) => Err(Error::Sql(e)),
        }
    }

    /// Checks a username/password pair. Unknown usernames and wrong
    /// passwords both come back as `None` so callers cannot tell them apart.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, Error> {
        let user = match self.get_user_by_username(username).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        match self.verify_password(password, &user.password_hash).await? {
            true => Ok(Some(user)),
            false => Ok(None),
        }
    }

    /// Bcrypt is CPU-bound, so both hashing and verification run on the
    /// blocking pool instead of stalling the async scheduler.
    pub async fn hash_password(&self, password: &str) -> Result<String, Error> {
        let password = password.to_owned();

        Ok(tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST)).await??)
    }

    /// A malformed digest verifies as `false` rather than erroring.
    pub async fn verify_password(&self, password: &str, digest: &str) -> Result<bool, Error> {
        let password = password.to_owned();
        let digest = digest.to_owned();

        Ok(
            tokio::task::spawn_blocking(move || bcrypt::verify(password, &digest).unwrap_or(false))
                .await?,
        )
    }

    pub fn encode_jwt(&self, user: &User) -> Result<String, Error> {
        let current_time = Utc::now();
        let expiration_time = current_time + self.token_ttl;

        let claims = Claims {
            exp: expiration_time.timestamp() as usize,
            iat: current_time.timestamp() as usize,
            sub: user.username.to_string(),
        };

        Ok(jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &self.encoding_key,
        )?)
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, Error> {
        match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(token_data) => Ok(token_data),
            Err(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(Error::ExpiredToken),
                _ => Err(Error::InvalidToken),
            },
        }
    }
}

fn map_user(row: SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    const SECRET: &str = "unit-test-secret";

    async fn controller(secret: &str) -> UserController {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        UserController::new(pool, secret, Duration::minutes(30))
    }

    fn user() -> User {
        User {
            id: 1,
            username: "testuser".to_string(),
            email: "testuser@example.com".to_string(),
            password_hash: String::new(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_password_round_trip() {
        let controller = controller(SECRET).await;

        let digest = controller.hash_password("testpass123").await.unwrap();
        let second = controller.hash_password("testpass123").await.unwrap();

        // fresh salt per call
        assert_ne!(digest, second);

        assert!(
            controller
                .verify_password("testpass123", &digest)
                .await
                .unwrap()
        );
        assert!(
            !controller
                .verify_password("wrongpassword", &digest)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_verify_rejects_malformed_digest() {
        let controller = controller(SECRET).await;

        assert!(
            !controller
                .verify_password("testpass123", "not-a-bcrypt-digest")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_jwt_round_trip() {
        let controller = controller(SECRET).await;

        let token = controller.encode_jwt(&user()).unwrap();
        let token_data = controller.decode_jwt(&token).unwrap();

        assert_eq!(token_data.claims.sub, "testuser");
        assert!(token_data.claims.exp > token_data.claims.iat);
    }

    #[tokio::test]
    async fn test_jwt_rejects_tampering() {
        let controller = controller(SECRET).await;

        let mut token = controller.encode_jwt(&user()).unwrap();

        let last = if token.ends_with('a') { 'b' } else { 'a' };
        token.pop();
        token.push(last);

        assert!(matches!(
            controller.decode_jwt(&token),
            Err(Error::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_jwt_rejects_wrong_secret() {
        let signer = controller(SECRET).await;
        let other = controller("a-different-secret").await;

        let token = signer.encode_jwt(&user()).unwrap();

        assert!(matches!(
            other.decode_jwt(&token),
            Err(Error::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_jwt_rejects_expired() {
        let controller = controller(SECRET).await;

        // Past the decoder's default leeway.
        let issued = Utc::now() - Duration::minutes(10);
        let claims = Claims {
            exp: (issued + Duration::minutes(5)).timestamp() as usize,
            iat: issued.timestamp() as usize,
            sub: "testuser".to_string(),
        };

        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            controller.decode_jwt(&token),
            Err(Error::ExpiredToken)
        ));
    }
}
