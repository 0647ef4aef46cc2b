#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Chat,
    Models,
    Plugins,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Chat, Route::Models, Route::Plugins];

    /// Unknown paths land on the chat.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/models" => Route::Models,
            "/plugins" => Route::Plugins,
            _ => Route::Chat,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Chat => "/",
            Route::Models => "/models",
            Route::Plugins => "/plugins",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Chat => "Chat",
            Route::Models => "Models",
            Route::Plugins => "Plugins",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn trailing_slash_and_unknown_paths() {
        assert_eq!(Route::from_path("/plugins/"), Route::Plugins);
        assert_eq!(Route::from_path("/settings"), Route::Chat);
        assert_eq!(Route::from_path(""), Route::Chat);
    }
}
