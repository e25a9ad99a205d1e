use crate::tenant_ids::TenantIds;
use crate::user::AuthUser;

/// `RequestContext` carries what the host knows about the caller of one request.
///
/// Access decisions are pure functions of this value.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    user: Option<AuthUser>,
}

impl RequestContext {
    /// Create a new `RequestContext` builder
    #[must_use]
    pub fn builder() -> RequestContextBuilder {
        RequestContextBuilder::default()
    }

    /// Context of a request without an authenticated user
    #[must_use]
    pub fn anonymous() -> Self {
        RequestContextBuilder::default().build()
    }

    /// Context for an authenticated `user`
    #[must_use]
    pub fn for_user(user: AuthUser) -> Self {
        Self::builder().user(user).build()
    }

    #[must_use]
    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True only for an authenticated user holding `super-admin`.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.user.as_ref().is_some_and(AuthUser::is_super_admin)
    }

    /// Tenants the caller belongs to; empty for anonymous requests.
    #[must_use]
    pub fn tenant_ids(&self) -> TenantIds {
        TenantIds::resolve(self.user.as_ref())
    }
}

#[derive(Default)]
pub struct RequestContextBuilder {
    user: Option<AuthUser>,
}

impl RequestContextBuilder {
    #[must_use]
    pub fn user(mut self, user: AuthUser) -> Self {
        self.user = Some(user);
        self
    }

    /// Sets the user from the host's optional user slot.
    #[must_use]
    pub fn maybe_user(mut self, user: Option<AuthUser>) -> Self {
        self.user = user;
        self
    }

    #[must_use]
    pub fn build(self) -> RequestContext {
        RequestContext { user: self.user }
    }
}
