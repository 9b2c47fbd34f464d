//! services/app/src/adapters/navigation.rs
//!
//! A back-stack implementation of the `Navigator` port.

use std::sync::Mutex;

use informes_core::{NavOptions, Navigator};
use tracing::debug;

pub struct BackStackNavigator {
    stack: Mutex<Vec<String>>,
}

impl BackStackNavigator {
    pub fn new(start: &str) -> Self {
        Self {
            stack: Mutex::new(vec![start.to_string()]),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.stack
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    /// The whole stack, bottom first.
    pub fn routes(&self) -> Vec<String> {
        self.stack.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Pops the top route. The last remaining route is never popped.
    /// Returns the route now on top.
    pub fn back(&self) -> Option<String> {
        let mut stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
        if stack.len() > 1 {
            stack.pop();
        }
        stack.last().cloned()
    }
}

impl Navigator for BackStackNavigator {
    fn navigate_to(&self, route: &str, options: NavOptions) {
        let mut stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(target) = options.pop_up_to.as_deref() {
            // An unknown target leaves the stack alone.
            if let Some(pos) = stack.iter().rposition(|r| r == target) {
                let keep = if options.inclusive { pos } else { pos + 1 };
                stack.truncate(keep);
            }
        }
        stack.push(route.to_string());
        debug!(route, depth = stack.len(), "Navigated.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use informes_core::routes;

    #[test]
    fn inclusive_pop_removes_the_login_screen() {
        let nav = BackStackNavigator::new(routes::LOGIN);
        nav.navigate_to(routes::LOG_SUCCESS, NavOptions::pop_up_to(routes::LOGIN, true));
        assert_eq!(nav.routes(), vec![routes::LOG_SUCCESS.to_string()]);
        assert_eq!(nav.back().as_deref(), Some(routes::LOG_SUCCESS));
    }

    #[test]
    fn plain_navigation_pushes() {
        let nav = BackStackNavigator::new(routes::LOGIN);
        nav.navigate_to(routes::REGISTER, NavOptions::default());
        assert_eq!(nav.current().as_deref(), Some(routes::REGISTER));
        assert_eq!(nav.back().as_deref(), Some(routes::LOGIN));
    }

    #[test]
    fn exclusive_pop_keeps_the_target() {
        let nav = BackStackNavigator::new(routes::LOGIN);
        nav.navigate_to(routes::REGISTER, NavOptions::default());
        nav.navigate_to(routes::INFORMES, NavOptions::pop_up_to(routes::LOGIN, false));
        assert_eq!(
            nav.routes(),
            vec![routes::LOGIN.to_string(), routes::INFORMES.to_string()]
        );
    }
}
