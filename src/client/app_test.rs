use super::*;
use uuid::Uuid;

fn user() -> User {
    User { id: Uuid::new_v4(), email: "a@example.com".into() }
}

#[test]
fn starts_on_title() {
    assert_eq!(AppRouter::new().screen(), Screen::Title);
}

#[test]
fn start_without_user_goes_to_sign_in() {
    let mut router = AppRouter::new();
    assert_eq!(router.start(), Screen::Login(LoginMode::SignIn));
}

#[test]
fn poetry_is_guarded() {
    let mut router = AppRouter::new();
    assert_eq!(router.navigate(Screen::Poetry), Screen::Login(LoginMode::SignIn));
    router.signed_in(user());
    assert_eq!(router.navigate(Screen::Poetry), Screen::Poetry);
}

#[test]
fn toggle_login_mode_only_on_login_screen() {
    let mut router = AppRouter::new();
    router.toggle_login_mode();
    assert_eq!(router.screen(), Screen::Title);

    router.navigate(Screen::Login(LoginMode::SignIn));
    router.toggle_login_mode();
    assert_eq!(router.screen(), Screen::Login(LoginMode::SignUp));
    router.toggle_login_mode();
    assert_eq!(router.screen(), Screen::Login(LoginMode::SignIn));
}

#[test]
fn sign_in_and_out() {
    let mut router = AppRouter::new();
    let u = user();
    assert_eq!(router.signed_in(u.clone()), Screen::Poetry);
    assert_eq!(router.user(), Some(&u));
    assert_eq!(router.start(), Screen::Poetry);

    assert_eq!(router.signed_out(), Screen::Title);
    assert!(router.user().is_none());
    assert_eq!(router.start(), Screen::Login(LoginMode::SignIn));
}
