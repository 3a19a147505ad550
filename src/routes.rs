//! Route table
//!
//! Typed routing surface for the dashboard pages. The root path redirects
//! to the prompting view; lead detail pages are addressed by slug.

use crate::store::Lead;

/// A dashboard page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/prompting`
    Prompting,
    /// `/chat`
    ChatOverview,
    /// `/leads-overview`
    LeadsOverview,
    /// `/leads/:slug`
    LeadDetail { slug: String },
}

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(Route),
    Redirect(Route),
    NotFound,
}

impl Route {
    /// Resolve a request path
    pub fn resolve(path: &str) -> Resolution {
        let trimmed = path.trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();

        match segments.as_slice() {
            [""] => Resolution::Redirect(Route::Prompting),
            ["prompting"] => Resolution::Matched(Route::Prompting),
            ["chat"] => Resolution::Matched(Route::ChatOverview),
            ["leads-overview"] => Resolution::Matched(Route::LeadsOverview),
            ["leads", slug] if !slug.is_empty() => Resolution::Matched(Route::LeadDetail {
                slug: (*slug).to_string(),
            }),
            _ => Resolution::NotFound,
        }
    }

    /// Detail page for a lead
    pub fn for_lead(lead: &Lead) -> Self {
        Route::LeadDetail {
            slug: lead.slug.clone(),
        }
    }

    /// Canonical path
    pub fn path(&self) -> String {
        match self {
            Route::Prompting => "/prompting".to_string(),
            Route::ChatOverview => "/chat".to_string(),
            Route::LeadsOverview => "/leads-overview".to_string(),
            Route::LeadDetail { slug } => format!("/leads/{}", slug),
        }
    }

    /// Route name
    pub fn name(&self) -> &'static str {
        match self {
            Route::Prompting => "Prompting",
            Route::ChatOverview => "ChatOverview",
            Route::LeadsOverview => "LeadsOverview",
            Route::LeadDetail { .. } => "LeadDetail",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LeadInput;

    #[test]
    fn test_root_redirects_to_prompting() {
        assert_eq!(Route::resolve("/"), Resolution::Redirect(Route::Prompting));
        assert_eq!(Route::resolve(""), Resolution::Redirect(Route::Prompting));
    }

    #[test]
    fn test_static_routes() {
        assert_eq!(
            Route::resolve("/prompting"),
            Resolution::Matched(Route::Prompting)
        );
        assert_eq!(Route::resolve("/chat/"), Resolution::Matched(Route::ChatOverview));
        assert_eq!(
            Route::resolve("/leads-overview"),
            Resolution::Matched(Route::LeadsOverview)
        );
    }

    #[test]
    fn test_lead_detail() {
        assert_eq!(
            Route::resolve("/leads/coffee-shop-brooklyn"),
            Resolution::Matched(Route::LeadDetail {
                slug: "coffee-shop-brooklyn".to_string()
            })
        );
        assert_eq!(Route::resolve("/leads/"), Resolution::NotFound);
        assert_eq!(Route::resolve("/leads/a/b"), Resolution::NotFound);
        assert_eq!(Route::resolve("/settings"), Resolution::NotFound);
    }

    #[test]
    fn test_lead_route_matches_default_url() {
        let lead = Lead::from_input(LeadInput::new("lead-3", "Manufacturing Co"));
        let route = Route::for_lead(&lead);
        assert_eq!(route.path(), lead.url);
        assert_eq!(route.name(), "LeadDetail");
        assert_eq!(Route::resolve(&lead.url), Resolution::Matched(route));
    }
}
