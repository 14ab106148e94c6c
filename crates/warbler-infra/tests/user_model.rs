//! User model behaviour: signup, authentication and follow queries, run
//! against the in-memory repositories with real Argon2 hashing.

use std::sync::Arc;

use warbler_core::domain::{NewUser, UpdateProfile};
use warbler_core::ports::{FollowRepository, MessageRepository, UserRepository};
use warbler_core::{DomainError, MessageService, UserService};
use warbler_infra::{
    Argon2PasswordService, InMemoryFollowRepository, InMemoryMessageRepository,
    InMemoryUserRepository, PasswordConfig,
};

struct Fixture {
    users: UserService,
    messages: MessageService,
    user_repo: Arc<InMemoryUserRepository>,
}

fn setup() -> Fixture {
    let user_repo = Arc::new(InMemoryUserRepository::new());
    let message_repo: Arc<dyn MessageRepository> = Arc::new(InMemoryMessageRepository::new());
    let follow_repo: Arc<dyn FollowRepository> = Arc::new(InMemoryFollowRepository::new());
    let passwords = Arc::new(
        Argon2PasswordService::with_config(&PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap(),
    );

    Fixture {
        users: UserService::new(
            user_repo.clone(),
            message_repo.clone(),
            follow_repo.clone(),
            passwords,
        ),
        messages: MessageService::new(message_repo, follow_repo),
        user_repo,
    }
}

fn new_user(username: &str, email: &str, password: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        image_url: None,
    }
}

#[tokio::test]
async fn test_user_model() {
    let fx = setup();

    let u = fx
        .users
        .signup(new_user("testuser", "test@test.com", "HASHED_PASSWORD"))
        .await
        .unwrap();

    // User should have no messages & no followers
    assert!(fx.users.messages(u.id).await.unwrap().is_empty());
    assert!(fx.users.followers(u.id).await.unwrap().is_empty());
    assert_eq!(u.email, "test@test.com");
    assert_ne!(u.password_hash, "HASHED_PASSWORD");

    assert_eq!(
        fx.users
            .authenticate("testuser", "HASHED_PASSWORD")
            .await
            .unwrap(),
        Some(u.clone())
    );
    assert_eq!(
        fx.users
            .authenticate("testuser", "WRONG_PASSWORD")
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        fx.users.authenticate("nobody", "HASHED_PASSWORD").await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_user_create_failure() {
    let fx = setup();

    let result = fx
        .users
        .signup(new_user("", "test@test.com", "HASHED_PASSWORD"))
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert!(fx.user_repo.search("").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_user_duplicate_failure() {
    let fx = setup();

    let u1 = fx
        .users
        .signup(new_user("u1", "u1@test.com", "pw"))
        .await
        .unwrap();
    let u2 = fx
        .users
        .signup(new_user("u1", "other@test.com", "pw2"))
        .await;

    assert!(matches!(u2, Err(DomainError::Duplicate(_))));

    let all = fx.user_repo.search("").await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, u1.id);
    assert!(fx.user_repo.find_by_email("other@test.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_failure() {
    let fx = setup();

    fx.users
        .signup(new_user("u1", "same@test.com", "pw"))
        .await
        .unwrap();
    let result = fx.users.signup(new_user("u2", "same@test.com", "pw")).await;

    assert!(matches!(result, Err(DomainError::Duplicate(_))));
}

#[tokio::test]
async fn test_user_following() {
    let fx = setup();
    let u1 = fx
        .users
        .signup(new_user("u1", "u1@test.com", "HASHED_PASSWORD"))
        .await
        .unwrap();
    let u2 = fx
        .users
        .signup(new_user("u2", "u2@test.com", "OTHER_PASSWORD"))
        .await
        .unwrap();

    // What u1's follow action on u2 records: u2 becomes u1's follower.
    fx.users.follow(u2.id, u1.id).await.unwrap();

    assert!(fx.users.is_followed_by(u1.id, u2.id).await.unwrap());
    assert!(!fx.users.is_followed_by(u2.id, u1.id).await.unwrap());
    assert!(fx.users.is_following(u2.id, u1.id).await.unwrap());
    assert!(!fx.users.is_following(u1.id, u2.id).await.unwrap());

    let followers = fx.users.followers(u1.id).await.unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].id, u2.id);
    assert!(fx.users.followers(u2.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_follow_is_idempotent_and_reversible() {
    let fx = setup();
    let u1 = fx.users.signup(new_user("u1", "u1@test.com", "pw")).await.unwrap();
    let u2 = fx.users.signup(new_user("u2", "u2@test.com", "pw")).await.unwrap();

    fx.users.follow(u1.id, u2.id).await.unwrap();
    fx.users.follow(u1.id, u2.id).await.unwrap();
    assert_eq!(fx.users.profile(u2.id).await.unwrap().follower_count, 1);

    assert!(fx.users.unfollow(u1.id, u2.id).await.unwrap());
    assert!(!fx.users.unfollow(u1.id, u2.id).await.unwrap());
    assert!(!fx.users.is_following(u1.id, u2.id).await.unwrap());
}

#[tokio::test]
async fn test_cannot_follow_self_or_missing_user() {
    let fx = setup();
    let u1 = fx.users.signup(new_user("u1", "u1@test.com", "pw")).await.unwrap();

    assert!(matches!(
        fx.users.follow(u1.id, u1.id).await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        fx.users.follow(u1.id, uuid::Uuid::new_v4()).await,
        Err(DomainError::NotFound { .. })
    ));
    let ghost = uuid::Uuid::new_v4();
    assert!(matches!(
        fx.users.follow(ghost, u1.id).await,
        Err(DomainError::NotFound { id, .. }) if id == ghost
    ));
    assert!(fx.users.followers(u1.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_profile_requires_password() {
    let fx = setup();
    let u1 = fx.users.signup(new_user("u1", "u1@test.com", "pw")).await.unwrap();
    fx.users.signup(new_user("u2", "u2@test.com", "pw")).await.unwrap();

    let changes = UpdateProfile {
        bio: Some("Hello!".into()),
        ..Default::default()
    };
    assert!(matches!(
        fx.users.update_profile(u1.id, "wrong", changes.clone()).await,
        Err(DomainError::Unauthorized)
    ));

    let updated = fx.users.update_profile(u1.id, "pw", changes).await.unwrap();
    assert_eq!(updated.bio.as_deref(), Some("Hello!"));

    let taken = UpdateProfile {
        username: Some("u2".into()),
        ..Default::default()
    };
    assert!(matches!(
        fx.users.update_profile(u1.id, "pw", taken).await,
        Err(DomainError::Duplicate(_))
    ));
}

#[tokio::test]
async fn test_delete_account_cascades() {
    let fx = setup();
    let u1 = fx.users.signup(new_user("u1", "u1@test.com", "pw")).await.unwrap();
    let u2 = fx.users.signup(new_user("u2", "u2@test.com", "pw")).await.unwrap();
    fx.users.follow(u1.id, u2.id).await.unwrap();
    fx.users.follow(u2.id, u1.id).await.unwrap();
    fx.messages.create(u1.id, "bye").await.unwrap();

    fx.users.delete_account(u1.id).await.unwrap();

    assert!(fx.users.find(u1.id).await.unwrap().is_none());
    assert!(fx.users.messages(u1.id).await.unwrap().is_empty());
    let profile = fx.users.profile(u2.id).await.unwrap();
    assert_eq!(profile.follower_count, 0);
    assert_eq!(profile.following_count, 0);
}

#[tokio::test]
async fn test_message_ownership_and_timeline() {
    let fx = setup();
    let u1 = fx.users.signup(new_user("u1", "u1@test.com", "pw")).await.unwrap();
    let u2 = fx.users.signup(new_user("u2", "u2@test.com", "pw")).await.unwrap();
    let u3 = fx.users.signup(new_user("u3", "u3@test.com", "pw")).await.unwrap();

    let own = fx.messages.create(u1.id, "mine").await.unwrap();
    let followed = fx.messages.create(u2.id, "followed").await.unwrap();
    fx.messages.create(u3.id, "stranger").await.unwrap();
    fx.users.follow(u1.id, u2.id).await.unwrap();

    let timeline = fx.messages.timeline(u1.id, 100).await.unwrap();
    let ids: Vec<_> = timeline.iter().map(|m| m.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&own.id));
    assert!(ids.contains(&followed.id));

    assert!(matches!(
        fx.messages.delete(u2.id, own.id).await,
        Err(DomainError::Forbidden)
    ));
    fx.messages.delete(u1.id, own.id).await.unwrap();
    assert!(matches!(
        fx.messages.get(own.id).await,
        Err(DomainError::NotFound { .. })
    ));
}
