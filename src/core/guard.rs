//! Page access decisions derived from the current session.
//!
//! The router itself lives in the UI layer; these functions only say
//! whether a page may open and, if not, where to send the user.

use crate::core::claims::Role;
use crate::core::session::SessionContext;
use crate::core::token_store::TokenStore;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const STOCK_PATH: &str = "/stock";

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Granted,
    Redirect(&'static str),
}

impl RouteAccess {
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Any signed-in user.
pub fn authenticated<S: TokenStore>(ctx: &SessionContext<S>) -> RouteAccess {
    if ctx.is_active() {
        RouteAccess::Granted
    } else {
        RouteAccess::Redirect(LOGIN_PATH)
    }
}

/// A signed-in user holding one of `allowed`.
///
/// A signed-in user without the role is sent to their landing page:
/// the dashboard for admins, stock for everyone else.
pub fn with_roles<S: TokenStore>(ctx: &SessionContext<S>, allowed: &[Role]) -> RouteAccess {
    let Some(role) = ctx.role() else {
        return RouteAccess::Redirect(LOGIN_PATH);
    };
    if allowed.contains(&role) {
        return RouteAccess::Granted;
    }
    tracing::debug!(%role, "role not permitted for route");
    match role {
        Role::Admin => RouteAccess::Redirect(DASHBOARD_PATH),
        _ => RouteAccess::Redirect(STOCK_PATH),
    }
}

pub fn admin_only<S: TokenStore>(ctx: &SessionContext<S>) -> RouteAccess {
    with_roles(ctx, &[Role::Admin])
}

/// Pages that let a user override item prices.
pub fn price_override<S: TokenStore>(ctx: &SessionContext<S>) -> RouteAccess {
    with_roles(ctx, &[Role::Admin, Role::Supervisor])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::token_store::MemoryTokenStore;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::DateTime;

    fn signed_in(role: &str) -> SessionContext<MemoryTokenStore> {
        let claims = serde_json::json!({"nameid": "u", "role": role, "exp": 10_000});
        let token = format!("h.{}.s", URL_SAFE_NO_PAD.encode(claims.to_string()));
        let mut ctx = SessionContext::new(MemoryTokenStore::new());
        ctx.login(&token, DateTime::from_timestamp(0, 0).unwrap())
            .unwrap();
        ctx
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        let ctx = SessionContext::new(MemoryTokenStore::new());
        assert_eq!(authenticated(&ctx), RouteAccess::Redirect("/login"));
        assert_eq!(admin_only(&ctx), RouteAccess::Redirect("/login"));
        assert_eq!(price_override(&ctx), RouteAccess::Redirect("/login"));
    }

    #[test]
    fn test_signed_in_passes_authenticated() {
        assert!(authenticated(&signed_in("Seller")).is_granted());
    }

    #[test]
    fn test_admin_only() {
        assert!(admin_only(&signed_in("Admin")).is_granted());
        assert_eq!(
            admin_only(&signed_in("Supervisor")),
            RouteAccess::Redirect("/stock")
        );
        assert_eq!(admin_only(&signed_in("Seller")), RouteAccess::Redirect("/stock"));
    }

    #[test]
    fn test_price_override() {
        assert!(price_override(&signed_in("Admin")).is_granted());
        assert!(price_override(&signed_in("Supervisor")).is_granted());
        assert_eq!(
            price_override(&signed_in("Seller")),
            RouteAccess::Redirect("/stock")
        );
    }

    #[test]
    fn test_admin_lacking_role_lands_on_dashboard() {
        assert_eq!(
            with_roles(&signed_in("Admin"), &[Role::Seller]),
            RouteAccess::Redirect("/dashboard")
        );
    }
}
