use crate::domain::User;
use crate::errors::{GatorError, GatorResult};
use crate::storage::traits::UserRepository;

pub struct UserService<R: UserRepository> {
    repository: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Create a user with a unique name
    pub fn register(&self, name: &str) -> GatorResult<User> {
        let user = User::new(name.to_string());

        self.repository.create(&user).map_err(|e| match e {
            GatorError::UniqueViolation(_) => GatorError::UserAlreadyExists(name.to_string()),
            other => other,
        })?;

        Ok(user)
    }

    /// Look up an existing user by name
    pub fn get(&self, name: &str) -> GatorResult<User> {
        self.repository
            .get_by_name(name)?
            .ok_or_else(|| GatorError::UserNotFound(name.to_string()))
    }

    pub fn list(&self) -> GatorResult<Vec<User>> {
        self.repository.get_all()
    }

    /// Delete every user along with their feeds, follows and posts
    pub fn reset(&self) -> GatorResult<()> {
        self.repository.reset()
    }
}
