//! User model -> entity mapper

use tube_core::entities::User;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            username: model.username,
            email: model.email,
            avatar: model.avatar,
            bio: model.bio,
            is_deaf: model.is_deaf,
            sign_language: model.sign_language,
            subscribers: model.subscribers,
            created_at: model.created_at,
        }
    }
}
