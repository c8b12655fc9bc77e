//! Authentication state for one session.

use tabula_core::model::user::CurrentUser;

/// Who is logged in, if anyone. Role getters answer `false` when nobody is.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    current_user: Option<CurrentUser>,
}

impl AuthState {
    #[must_use]
    pub const fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(CurrentUser::is_admin)
    }

    #[must_use]
    pub fn is_manager(&self) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(CurrentUser::is_manager)
    }

    #[must_use]
    pub fn is_employee(&self) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(CurrentUser::is_employee)
    }

    pub(crate) fn set(&mut self, user: CurrentUser) {
        self.current_user = Some(user);
    }

    pub(crate) fn clear(&mut self) {
        self.current_user = None;
    }
}
