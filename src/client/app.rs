//! Top-level screen routing.
//!
//! Title -> Login (sign in or sign up) -> Poetry. The poetry screen is
//! guarded: without a signed-in user it resolves to the sign-in form.

use crate::poem::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Title,
    Login(LoginMode),
    Poetry,
}

#[derive(Debug, Clone, Default)]
pub struct AppRouter {
    screen: Screen,
    user: Option<User>,
}

impl AppRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Move to `target`, applying the poetry guard. Returns the screen
    /// actually shown.
    pub fn navigate(&mut self, target: Screen) -> Screen {
        self.screen = match target {
            Screen::Poetry if self.user.is_none() => Screen::Login(LoginMode::SignIn),
            other => other,
        };
        self.screen
    }

    /// The title screen's start button.
    pub fn start(&mut self) -> Screen {
        self.navigate(Screen::Poetry)
    }

    /// Flip the login form between sign-in and sign-up.
    pub fn toggle_login_mode(&mut self) {
        if let Screen::Login(mode) = self.screen {
            self.screen = Screen::Login(match mode {
                LoginMode::SignIn => LoginMode::SignUp,
                LoginMode::SignUp => LoginMode::SignIn,
            });
        }
    }

    pub fn signed_in(&mut self, user: User) -> Screen {
        self.user = Some(user);
        self.navigate(Screen::Poetry)
    }

    pub fn signed_out(&mut self) -> Screen {
        self.user = None;
        self.navigate(Screen::Title)
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
