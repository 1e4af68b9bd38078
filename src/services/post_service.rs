use crate::domain::{Post, User};
use crate::errors::{GatorError, GatorResult};
use crate::storage::traits::PostRepository;

pub const DEFAULT_BROWSE_LIMIT: u32 = 2;

pub struct PostService<P: PostRepository> {
    repository: P,
}

impl<P: PostRepository> PostService<P> {
    pub fn new(repository: P) -> Self {
        Self { repository }
    }

    /// Newest posts from the feeds `user` follows
    pub fn browse(&self, user: &User, limit: u32) -> GatorResult<Vec<Post>> {
        if limit == 0 {
            return Err(GatorError::InvalidInput(
                "cannot fetch a non-positive number of posts".to_string(),
            ));
        }

        self.repository.get_for_user(user.id, limit)
    }
}
