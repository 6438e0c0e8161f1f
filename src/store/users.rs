use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set,
    TransactionTrait,
};

use super::{Store, now_sec};
use crate::{
    entities::{booking, user},
    error::{AppError, AppResult},
    models::{UserView, guest_username, validate_username},
};

const DUPLICATE_USER: &str = "A user with that username already exists.";
const MIN_PASSWORD_LEN: usize = 8;

impl Store {
    pub async fn find_username(&self, username: &str) -> AppResult<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }

    pub async fn register(&self, username: &str, password: &str) -> AppResult<UserView> {
        let username = validate_username(username)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters."
            )));
        }
        let hash = self.hash_password(password).await?;

        let model = user::ActiveModel {
            id: Default::default(),
            username: Set(username),
            password_hash: Set(Some(hash)),
            is_staff: Set(false),
            created_at: Set(now_sec()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| AppError::unique_or_internal(e, DUPLICATE_USER))?;

        tracing::info!(user_id = model.id, username = %model.username, "user registered");
        Ok(model.into())
    }

    /// Creates or promotes a staff account and resets its password.
    pub async fn ensure_staff(&self, username: &str, password: &str) -> AppResult<UserView> {
        let username = validate_username(username)?;
        let hash = self.hash_password(password).await?;

        let model = match self.find_username(&username).await? {
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.password_hash = Set(Some(hash));
                active.is_staff = Set(true);
                active.update(&self.db).await?
            }
            None => {
                user::ActiveModel {
                    id: Default::default(),
                    username: Set(username),
                    password_hash: Set(Some(hash)),
                    is_staff: Set(true),
                    created_at: Set(now_sec()),
                }
                .insert(&self.db)
                .await?
            }
        };

        tracing::info!(user_id = model.id, username = %model.username, "staff account ready");
        Ok(model.into())
    }

    /// Checks Basic credentials. Accounts without a password never match.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<Option<user::Model>> {
        let Some(found) = self.find_username(username).await? else {
            return Ok(None);
        };
        let Some(hash) = found.password_hash.clone() else {
            return Ok(None);
        };

        let password = password.to_string();
        let ok = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(anyhow::Error::new)??;
        Ok(ok.then_some(found))
    }

    /// Gets or creates the password-less `guest_<name>` account.
    pub async fn guest_user(&self, guest_name: &str) -> AppResult<user::Model> {
        let username = guest_username(guest_name);
        if let Some(found) = self.find_username(&username).await? {
            return Ok(found);
        }

        let inserted = user::ActiveModel {
            id: Default::default(),
            username: Set(username.clone()),
            password_hash: Set(None),
            is_staff: Set(false),
            created_at: Set(now_sec()),
        }
        .insert(&self.db)
        .await;

        match inserted {
            Ok(model) => Ok(model),
            // Lost a race with a concurrent request for the same guest.
            Err(err) => match AppError::unique_or_internal(err, DUPLICATE_USER) {
                AppError::Conflict(_) => self
                    .find_username(&username)
                    .await?
                    .ok_or_else(|| AppError::not_found("User")),
                other => Err(other),
            },
        }
    }

    /// Deletes a user and their bookings. Staff may delete anyone, others
    /// only themselves.
    pub async fn delete_user(&self, actor: &user::Model, id: i32) -> AppResult<()> {
        if actor.id != id && !actor.is_staff {
            return Err(AppError::PermissionDenied(
                "You can only delete your own account".into(),
            ));
        }

        let txn = self.db.begin().await?;

        if user::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(AppError::not_found("User"));
        }

        let removed = booking::Entity::delete_many()
            .filter(booking::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
        user::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(user_id = id, bookings_removed = removed.rows_affected, "user deleted");
        Ok(())
    }

    async fn hash_password(&self, password: &str) -> AppResult<String> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;
        Ok(tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(anyhow::Error::new)??)
    }
}
