//! Tests for code issuance and verification.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    use crate::auth::{hash_code, OtpPurpose, OtpService, OtpServiceTrait};
    use crate::errors::{AuthError, Error, Result};
    use crate::sms::SmsChannelTrait;
    use crate::users::{NewUser, PendingCode, Role, User, UserRepositoryTrait};

    #[derive(Clone, Default)]
    struct MockUserRepository {
        users: Arc<Mutex<Vec<User>>>,
    }

    impl MockUserRepository {
        fn seed(&self, phone: &str) -> User {
            let now = Utc::now().naive_utc();
            let user = User {
                id: format!("u-{}", self.users.lock().unwrap().len() + 1),
                phone_number: phone.to_string(),
                full_name: "مهندس سامح حافظ".to_string(),
                role: Role::Engineer,
                role_label: None,
                pending_code: None,
                created_at: now,
                updated_at: now,
            };
            self.users.lock().unwrap().push(user.clone());
            user
        }

        fn pending(&self, phone: &str) -> Option<PendingCode> {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.phone_number == phone)
                .and_then(|u| u.pending_code.clone())
        }

        fn expire(&self, phone: &str) {
            let mut users = self.users.lock().unwrap();
            let user = users.iter_mut().find(|u| u.phone_number == phone).unwrap();
            if let Some(code) = user.pending_code.as_mut() {
                code.expires_at = Utc::now() - Duration::minutes(1);
            }
        }
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

        async fn insert(&self, _new_user: NewUser) -> Result<User> {
            unimplemented!()
        }

        async fn set_pending_code(&self, user_id: &str, code: PendingCode) -> Result<()> {
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or_else(|| Error::NotFound(format!("user {user_id}")))?;
            user.pending_code = Some(code);
            Ok(())
        }

        async fn clear_pending_code(&self, user_id: &str) -> Result<()> {
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or_else(|| Error::NotFound(format!("user {user_id}")))?;
            user.pending_code = None;
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct MockSmsChannel {
        sent: Arc<Mutex<Vec<(String, String)>>>,
        fail: Arc<Mutex<bool>>,
    }

    impl MockSmsChannel {
        fn set_fail(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        fn last_code(&self, phone: &str) -> String {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .filter(|(p, _)| p == phone)
                .map(|(_, m)| m.chars().filter(|c| c.is_ascii_digit()).collect())
                .last()
                .expect("a code message was sent")
        }
    }

    #[async_trait]
    impl SmsChannelTrait for MockSmsChannel {
        async fn send(&self, phone_number: &str, message: &str) -> Result<()> {
            if *self.fail.lock().unwrap() {
                return Err(Error::Sms("gateway unreachable".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((phone_number.to_string(), message.to_string()));
            Ok(())
        }
    }

    const PHONE: &str = "0501112222";

    fn setup() -> (MockUserRepository, MockSmsChannel, OtpService) {
        let users = MockUserRepository::default();
        let sms = MockSmsChannel::default();
        let service = OtpService::new(Arc::new(users.clone()), Arc::new(sms.clone()));
        (users, sms, service)
    }

    #[tokio::test]
    async fn issue_stores_a_hashed_code_and_delivers_it() {
        let (users, sms, service) = setup();
        users.seed(PHONE);

        service.issue_code(PHONE, OtpPurpose::Login).await.unwrap();

        let code = sms.last_code(PHONE);
        assert_eq!(code.len(), 6);
        let pending = users.pending(PHONE).expect("code persisted");
        assert_eq!(pending.code_hash, hash_code(&code));
        assert_eq!(pending.purpose, OtpPurpose::Login);
        assert!(pending.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn issue_for_unknown_phone_is_not_found() {
        let (_users, _sms, service) = setup();
        assert!(matches!(
            service.issue_code(PHONE, OtpPurpose::Login).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn issue_succeeds_even_when_delivery_fails() {
        let (users, sms, service) = setup();
        users.seed(PHONE);
        sms.set_fail(true);

        service.issue_code(PHONE, OtpPurpose::Login).await.unwrap();
        assert!(users.pending(PHONE).is_some());
    }

    #[tokio::test]
    async fn correct_code_verifies_exactly_once() {
        let (users, sms, service) = setup();
        users.seed(PHONE);
        service.issue_code(PHONE, OtpPurpose::Login).await.unwrap();
        let code = sms.last_code(PHONE);

        service
            .verify_code(PHONE, &code, OtpPurpose::Login)
            .await
            .unwrap();
        assert!(users.pending(PHONE).is_none());

        // Replay fails: the code was consumed.
        assert!(matches!(
            service.verify_code(PHONE, &code, OtpPurpose::Login).await,
            Err(Error::Auth(AuthError::CodeNotIssued))
        ));
    }

    #[tokio::test]
    async fn wrong_code_does_not_consume_the_challenge() {
        let (users, sms, service) = setup();
        users.seed(PHONE);
        service.issue_code(PHONE, OtpPurpose::Login).await.unwrap();
        let stored = users.pending(PHONE).unwrap();

        let result = service
            .verify_code(PHONE, "wrong!", OtpPurpose::Login)
            .await;
        assert!(matches!(result, Err(Error::Auth(AuthError::CodeInvalid))));
        // Challenge untouched, expiry included.
        assert_eq!(users.pending(PHONE), Some(stored));

        // The real code still works afterwards.
        let code = sms.last_code(PHONE);
        service
            .verify_code(PHONE, &code, OtpPurpose::Login)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn expired_code_is_refused() {
        let (users, sms, service) = setup();
        users.seed(PHONE);
        service.issue_code(PHONE, OtpPurpose::Login).await.unwrap();
        users.expire(PHONE);

        let code = sms.last_code(PHONE);
        assert!(matches!(
            service.verify_code(PHONE, &code, OtpPurpose::Login).await,
            Err(Error::Auth(AuthError::CodeExpired))
        ));
    }

    #[tokio::test]
    async fn purpose_mismatch_is_refused_without_consuming() {
        let (users, sms, service) = setup();
        users.seed(PHONE);
        service
            .issue_code(PHONE, OtpPurpose::Approval)
            .await
            .unwrap();
        let code = sms.last_code(PHONE);

        // An approval code cannot log anyone in.
        assert!(matches!(
            service.verify_code(PHONE, &code, OtpPurpose::Login).await,
            Err(Error::Auth(AuthError::CodeInvalid))
        ));
        service
            .verify_code(PHONE, &code, OtpPurpose::Approval)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn code_login_yields_a_session_for_the_verified_user() {
        use crate::auth::{AuthService, AuthServiceTrait, Session, SessionIssuerTrait};
        use crate::users::User;

        struct StubSessionIssuer;

        impl SessionIssuerTrait for StubSessionIssuer {
            fn issue(&self, user: &User) -> Result<Session> {
                Ok(Session {
                    token: format!("token-for-{}", user.id),
                    actor: user.into(),
                })
            }
        }

        let (users, sms, otp_service) = setup();
        let seeded = users.seed(PHONE);
        let otp: Arc<dyn crate::auth::OtpServiceTrait> = Arc::new(otp_service);
        let auth = AuthService::new(Arc::new(users.clone()), otp, Arc::new(StubSessionIssuer));

        auth.begin_login(PHONE).await.unwrap();
        let code = sms.last_code(PHONE);
        let session = auth.complete_login(PHONE, &code).await.unwrap();
        assert_eq!(session.token, format!("token-for-{}", seeded.id));
        assert_eq!(session.actor.phone_number, PHONE);

        // The login code is spent; a second login needs a fresh one.
        assert!(matches!(
            auth.complete_login(PHONE, &code).await,
            Err(Error::Auth(AuthError::CodeNotIssued))
        ));
    }

    #[tokio::test]
    async fn reissuing_overwrites_the_previous_code() {
        let (users, sms, service) = setup();
        users.seed(PHONE);

        service.issue_code(PHONE, OtpPurpose::Login).await.unwrap();
        let first = sms.last_code(PHONE);
        service.issue_code(PHONE, OtpPurpose::Login).await.unwrap();
        let second = sms.last_code(PHONE);

        if first != second {
            assert!(matches!(
                service.verify_code(PHONE, &first, OtpPurpose::Login).await,
                Err(Error::Auth(AuthError::CodeInvalid))
            ));
        }
        service
            .verify_code(PHONE, &second, OtpPurpose::Login)
            .await
            .unwrap();
    }
}
