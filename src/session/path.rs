//! Path intent: the location-derived inputs to the bootstrap decision.
//!
//! Computed from the current location (path plus query string) at callback
//! time, never stored. Auth-page detection is a literal substring test over
//! the whole location, so a `redirect` query value naming an auth route also
//! counts. That looseness is part of the routing contract.

/// Route fragments that mark a location as an auth page.
pub const AUTH_PAGES: [&str; 4] = ["/login", "/signup", "/callback", "/error"];

/// The location-derived inputs to [`resolve_outcome`](super::resolve_outcome).
///
/// # Examples
///
/// ```
/// use flowmastery::session::PathIntent;
///
/// let intent = PathIntent::from_location("/login?redirect=/dashboard");
/// assert_eq!(intent.current_path, "/login?redirect=/dashboard");
/// assert_eq!(intent.redirect_path.as_deref(), Some("/dashboard"));
/// assert!(intent.is_auth_page);
///
/// let intent = PathIntent::from_location("/dashboard");
/// assert!(intent.redirect_path.is_none());
/// assert!(!intent.is_auth_page);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathIntent {
    /// Path plus query string at callback time.
    pub current_path: String,
    /// Value of the `redirect` query parameter, when present and non-empty.
    pub redirect_path: Option<String>,
    /// Whether the location contains any of [`AUTH_PAGES`].
    pub is_auth_page: bool,
}

impl PathIntent {
    /// Derives the intent from a location string (path plus query).
    pub fn from_location(location: &str) -> Self {
        let current_path = location.to_string();

        let query = location.split_once('?').map_or("", |(_, query)| query);
        let redirect_path = url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "redirect")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());

        let is_auth_page = AUTH_PAGES.iter().any(|page| current_path.contains(page));

        Self {
            current_path,
            redirect_path,
            is_auth_page,
        }
    }
}
