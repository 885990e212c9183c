//! Static route table for the console screens.

/// The two navigable screens. No guards, no redirects, no shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    ListPost,
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Self::Landing),
            "/list-post" => Some(Self::ListPost),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::ListPost => "/list-post",
        }
    }

    pub const ALL: [Route; 2] = [Route::Landing, Route::ListPost];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_resolve() {
        assert_eq!(Route::parse("/"), Some(Route::Landing));
        assert_eq!(Route::parse("/list-post"), Some(Route::ListPost));
    }

    #[test]
    fn unknown_paths_are_rejected() {
        assert_eq!(Route::parse(""), None);
        assert_eq!(Route::parse("/posts"), None);
        assert_eq!(Route::parse("/list-post/"), None);
    }

    #[test]
    fn paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
    }
}
