use std::collections::HashSet;

use super::requests_traits::RequestPolicyTrait;
use crate::auth::Actor;

/// Allow-list policy: only the named employees may file float requests.
pub struct AllowListPolicy {
    employees: HashSet<String>,
}

impl AllowListPolicy {
    pub fn new<I, S>(employees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            employees: employees.into_iter().map(Into::into).collect(),
        }
    }
}

impl RequestPolicyTrait for AllowListPolicy {
    fn may_request_float(&self, actor: &Actor) -> bool {
        self.employees.contains(&actor.full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::Role;

    fn actor(name: &str) -> Actor {
        Actor {
            user_id: "u-1".to_string(),
            role: Role::Engineer,
            phone_number: "0501112222".to_string(),
            full_name: name.to_string(),
        }
    }

    #[test]
    fn only_listed_employees_pass() {
        let policy = AllowListPolicy::new(["مهندس سامح حافظ", "استاذ مشعل العصيمي"]);
        assert!(policy.may_request_float(&actor("مهندس سامح حافظ")));
        assert!(!policy.may_request_float(&actor("دكتور سعود العصيمي")));
    }
}
