//! Route matching for the dashboard's user-facing paths.

/// The routes the application exposes. Anything unmatched renders the
/// not-found page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The dashboard at `/`.
    Home,
    /// Hosted login form.
    Login,
    /// Hosted signup form.
    Signup,
    /// Post-auth callback landing.
    Callback,
    /// Auth error landing.
    AuthError,
    /// Catch-all 404.
    NotFound,
}

impl Route {
    /// Matches a location (path plus optional query) to a route.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowmastery::app::router::Route;
    ///
    /// assert_eq!(Route::match_location("/"), Route::Home);
    /// assert_eq!(Route::match_location("/login?redirect=/x"), Route::Login);
    /// assert_eq!(Route::match_location("/nope"), Route::NotFound);
    /// ```
    pub fn match_location(location: &str) -> Self {
        let path = location.split('?').next().unwrap_or(location);
        match path {
            "" | "/" => Self::Home,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/callback" => Self::Callback,
            "/error" => Self::AuthError,
            _ => Self::NotFound,
        }
    }

    /// Whether this route requires an authenticated session.
    pub fn is_protected(&self) -> bool {
        matches!(self, Self::Home)
    }
}
