use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Role, User, UserNew, UserUpdate, event_registrations, events,
    password, users,
    util::{normalize_email, normalize_required},
};

use super::{Engine, with_tx};

impl Engine {
    /// Register a new user. Emails are unique (case-insensitive).
    pub async fn create_user(&self, cmd: UserNew) -> ResultEngine<User> {
        let name = normalize_required(&cmd.name, "name")?;
        let email = normalize_email(&cmd.email)?;
        if cmd.password.is_empty() {
            return Err(EngineError::InvalidField(
                "password must not be empty".to_string(),
            ));
        }
        let password_hash = password::hash_password(&cmd.password)?;

        with_tx!(self, |db_tx| {
            if self.find_user_by_email(&db_tx, &email).await?.is_some() {
                return Err(EngineError::ExistingKey(email));
            }

            let user = User::new(name, email, password_hash);
            users::ActiveModel::from(&user).insert(&db_tx).await?;
            tracing::debug!("created user {}", user.id);
            Ok(user)
        })
    }

    /// Check `email`/`password` and return the matching active user.
    ///
    /// Every failure (unknown email, wrong password, inactive account) is
    /// reported as [`EngineError::WrongCredentials`].
    pub async fn authenticate(&self, email: &str, password: &str) -> ResultEngine<User> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.find_user_by_email(self.db()?, &email).await? else {
            tracing::warn!("login failed: user not found");
            return Err(EngineError::WrongCredentials);
        };
        if !user.is_active {
            tracing::warn!("login failed: user {} is inactive", user.id);
            return Err(EngineError::WrongCredentials);
        }
        if !password::verify_password(password, &user.password_hash)? {
            tracing::warn!("login failed: invalid password for user {}", user.id);
            return Err(EngineError::WrongCredentials);
        }
        Ok(user)
    }

    pub async fn user(&self, user_id: Uuid) -> ResultEngine<User> {
        self.require_user(self.db()?, user_id).await
    }

    pub async fn user_by_email(&self, email: &str) -> ResultEngine<User> {
        let email = email.trim().to_lowercase();
        self.find_user_by_email(self.db()?, &email)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }

    /// All users, oldest first.
    pub async fn list_users(&self) -> ResultEngine<Vec<User>> {
        users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .order_by_asc(users::Column::Name)
            .all(self.db()?)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    /// Update name, email or password of `user_id` (self or admin).
    pub async fn update_user(
        &self,
        user_id: Uuid,
        cmd: UserUpdate,
        actor: &User,
    ) -> ResultEngine<User> {
        self.require_user_manager(user_id, actor)?;
        let name = cmd
            .name
            .as_deref()
            .map(|name| normalize_required(name, "name"))
            .transpose()?;
        let email = cmd.email.as_deref().map(normalize_email).transpose()?;
        let password_hash = match cmd.password.as_deref() {
            Some("") => {
                return Err(EngineError::InvalidField(
                    "password must not be empty".to_string(),
                ));
            }
            Some(password) => Some(password::hash_password(password)?),
            None => None,
        };

        with_tx!(self, |db_tx| {
            let mut user = self.require_user(&db_tx, user_id).await?;

            if let Some(email) = email {
                if email != user.email {
                    if self.find_user_by_email(&db_tx, &email).await?.is_some() {
                        return Err(EngineError::ExistingKey(email));
                    }
                    user.email = email;
                }
            }
            if let Some(name) = name {
                user.name = name;
            }
            if let Some(password_hash) = password_hash {
                user.password_hash = password_hash;
            }
            user.updated_at = Utc::now();

            users::ActiveModel::from(&user).update(&db_tx).await?;
            Ok(user)
        })
    }

    /// Change the role of a user. Used by the admin tooling.
    pub async fn set_user_role(&self, user_id: Uuid, role: Role) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            let mut user = self.require_user(&db_tx, user_id).await?;
            user.role = role;
            user.updated_at = Utc::now();
            users::ActiveModel::from(&user).update(&db_tx).await?;
            Ok(user)
        })
    }

    /// Enable or disable an account. Inactive users cannot authenticate.
    pub async fn set_user_active(&self, user_id: Uuid, active: bool) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            let mut user = self.require_user(&db_tx, user_id).await?;
            user.is_active = active;
            user.updated_at = Utc::now();
            users::ActiveModel::from(&user).update(&db_tx).await?;
            tracing::info!("user {user_id} active: {active}");
            Ok(user)
        })
    }

    /// Delete a user (self or admin).
    ///
    /// Events created by the user are kept with no creator; the user's
    /// registrations are removed.
    pub async fn delete_user(&self, user_id: Uuid, actor: &User) -> ResultEngine<()> {
        self.require_user_manager(user_id, actor)?;
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let id = user_id.to_string();

            let orphaned = events::Entity::update_many()
                .col_expr(events::Column::CreatedBy, Expr::value(Option::<String>::None))
                .filter(events::Column::CreatedBy.eq(id.clone()))
                .exec(&db_tx)
                .await?;

            event_registrations::Entity::delete_many()
                .filter(event_registrations::Column::UserId.eq(id.clone()))
                .exec(&db_tx)
                .await?;

            users::Entity::delete_by_id(id).exec(&db_tx).await?;

            tracing::info!(
                "deleted user {user_id}, {} events left without creator",
                orphaned.rows_affected
            );
            Ok(())
        })
    }
}
