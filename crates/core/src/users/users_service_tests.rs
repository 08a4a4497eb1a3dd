//! Tests for user registration and seeding.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::errors::{Error, Result};
    use crate::users::{
        NewUser, PendingCode, Role, User, UserRepositoryTrait, UserService, UserServiceTrait,
    };

    #[derive(Clone, Default)]
    struct MockUserRepository {
        users: Arc<Mutex<Vec<User>>>,
    }

    #[async_trait]
    impl UserRepositoryTrait for MockUserRepository {
        fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == user_id)
                .cloned())
        }

        fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.phone_number == phone_number)
                .cloned())
        }

        fn find_by_name(&self, full_name: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.full_name == full_name)
                .cloned())
        }

        fn list_by_role(&self, role: Role) -> Result<Vec<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .filter(|u| u.role == role)
                .cloned()
                .collect())
        }

        async fn insert(&self, new_user: NewUser) -> Result<User> {
            let now = Utc::now().naive_utc();
            let user = User {
                id: Uuid::new_v4().to_string(),
                phone_number: new_user.phone_number,
                full_name: new_user.full_name,
                role: new_user.role,
                role_label: new_user.role_label,
                pending_code: None,
                created_at: now,
                updated_at: now,
            };
            self.users.lock().unwrap().push(user.clone());
            Ok(user)
        }

        async fn set_pending_code(&self, _user_id: &str, _code: PendingCode) -> Result<()> {
            unimplemented!()
        }

        async fn clear_pending_code(&self, _user_id: &str) -> Result<()> {
            unimplemented!()
        }
    }

    fn doctor() -> NewUser {
        NewUser {
            phone_number: "0505556666".to_string(),
            full_name: "دكتور سعود العصيمي".to_string(),
            role: Role::Doctor,
            role_label: Some("الدكتور".to_string()),
        }
    }

    #[tokio::test]
    async fn create_then_lookup_by_phone_and_role() {
        let repo = MockUserRepository::default();
        let service = UserService::new(Arc::new(repo));

        let created = service.create_user(doctor()).await.unwrap();
        assert_eq!(created.role, Role::Doctor);

        let found = service.get_by_phone("0505556666").unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(service.list_by_role(Role::Doctor).unwrap().len(), 1);
        assert!(service.list_by_role(Role::Accountant).unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_phone_is_a_conflict() {
        let repo = MockUserRepository::default();
        let service = UserService::new(Arc::new(repo));

        service.create_user(doctor()).await.unwrap();
        assert!(matches!(
            service.create_user(doctor()).await,
            Err(Error::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn ensure_user_is_idempotent() {
        let repo = MockUserRepository::default();
        let service = UserService::new(Arc::new(repo));

        let first = service.ensure_user(doctor()).await.unwrap();
        let second = service.ensure_user(doctor()).await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn blank_fields_fail_validation() {
        let repo = MockUserRepository::default();
        let service = UserService::new(Arc::new(repo));

        let mut bad = doctor();
        bad.phone_number = " ".to_string();
        assert!(matches!(
            service.create_user(bad).await,
            Err(Error::Validation(_))
        ));
    }
}
