//! Tests for the in-memory user repository

use crate::domain::entities::user::{Role, User};
use crate::errors::DomainError;
use crate::repositories::{MockUserRepository, UserRepository};

fn user(email: &str, first: &str, last: &str) -> User {
    User::new(email, "hash", first, last, Role::Tenant)
}

#[tokio::test]
async fn test_create_assigns_ids() {
    let repo = MockUserRepository::new();
    let a = repo.create(user("a@x.com", "Ann", "Lee")).await.unwrap();
    let b = repo.create(user("b@x.com", "Ben", "Ong")).await.unwrap();

    assert_ne!(a.id, 0);
    assert_ne!(a.id, b.id);
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let repo = MockUserRepository::new();
    repo.create(user("a@x.com", "Ann", "Lee")).await.unwrap();
    let err = repo.create(user("a@x.com", "Other", "Person")).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
}

#[tokio::test]
async fn test_find_and_update() {
    let repo = MockUserRepository::new();
    let mut created = repo.create(user("a@x.com", "Ann", "Lee")).await.unwrap();
    assert!(repo.exists_by_email("a@x.com").await.unwrap());

    created.deactivate();
    repo.update(created.clone()).await.unwrap();
    let found = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    assert!(!found.is_active);

    let mut ghost = created;
    ghost.id = 999;
    assert!(matches!(
        repo.update(ghost).await.unwrap_err(),
        DomainError::NotFound { .. }
    ));
}

#[tokio::test]
async fn test_search_by_name() {
    let repo = MockUserRepository::new();
    repo.create(user("a@x.com", "Annabel", "Lee")).await.unwrap();
    repo.create(user("b@x.com", "Ben", "Hanna")).await.unwrap();
    repo.create(user("c@x.com", "Carl", "Ito")).await.unwrap();

    let found = repo.search_by_name("ANN").await.unwrap();
    let emails: Vec<_> = found.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
}
