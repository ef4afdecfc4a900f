//! View routing

/// A top-level view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Form { document_id: String },
}

/// Tracks the current route and reports transitions once
#[derive(Debug, Default)]
pub struct Navigator {
    current: Route,
    pending: Option<Route>,
}

impl Navigator {
    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Go to the editing view of a document
    pub fn open_document(&mut self, document_id: impl Into<String>) {
        self.go(Route::Form {
            document_id: document_id.into(),
        });
    }

    /// Return to the listing view
    pub fn back_to_listing(&mut self) {
        self.go(Route::Dashboard);
    }

    fn go(&mut self, route: Route) {
        if self.current == route {
            return;
        }
        tracing::info!("Navigating to {:?}", route);
        self.current = route.clone();
        self.pending = Some(route);
    }

    /// The route entered since the last call, if any
    pub fn take_transition(&mut self) -> Option<Route> {
        self.pending.take()
    }
}
