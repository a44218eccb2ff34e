use std::sync::Mutex;

use lineage_derive::Navigator;
use tracing::debug;

/// Queues navigation requests for the command loop to act on after the
/// wizard returns.
#[derive(Debug, Default)]
pub struct CliNavigator {
    routes: Mutex<Vec<String>>,
}

impl CliNavigator {
    /// Drain the requested routes in order.
    pub fn take_routes(&self) -> Vec<String> {
        let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *routes)
    }
}

impl Navigator for CliNavigator {
    fn on_action(&self, route: &str) {
        debug!(route, "navigation requested");
        self.routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_are_drained_in_order() {
        let nav = CliNavigator::default();
        nav.on_action("/");
        nav.on_action("/other");
        assert_eq!(nav.take_routes(), vec!["/", "/other"]);
        assert!(nav.take_routes().is_empty());
    }
}
