#![forbid(unsafe_code)]

//! The sign-in screen.
//!
//! Two text fields (session token, CSRF token). While this screen is
//! active every printable key is text input, so the global bindings do not
//! fire. Escape clears the focused field first; a second Escape on an
//! empty field navigates back.

use grind_core::event::{KeyCode, KeyEvent};

use crate::command::Command;
use crate::screens::{Ctx, Outcome};

/// Which field is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Session,
    Csrf,
}

/// The login screen's sub-model.
#[derive(Debug, Clone, Default)]
pub struct LoginModel {
    pub session: String,
    pub csrf: String,
    pub field: LoginField,
    pub submitting: bool,
    pub error: Option<String>,
}

impl LoginModel {
    fn focused_mut(&mut self) -> &mut String {
        match self.field {
            LoginField::Session => &mut self.session,
            LoginField::Csrf => &mut self.csrf,
        }
    }

    pub fn on_key(&mut self, key: &KeyEvent, _ctx: &mut Ctx<'_>) -> Outcome {
        if self.submitting {
            // A login attempt is in flight; only Escape backs out.
            if key.code == KeyCode::Escape {
                return Outcome::Back;
            }
            return Outcome::Command(Command::None);
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Up | KeyCode::BackTab => {
                self.field = match self.field {
                    LoginField::Session => LoginField::Csrf,
                    LoginField::Csrf => LoginField::Session,
                };
                Outcome::Command(Command::None)
            }
            KeyCode::Enter => {
                if self.session.is_empty() || self.csrf.is_empty() {
                    self.error = Some("both tokens are required".to_string());
                    return Outcome::Command(Command::None);
                }
                self.submitting = true;
                self.error = None;
                Outcome::Command(Command::Login {
                    session: self.session.clone(),
                    csrf: self.csrf.clone(),
                })
            }
            KeyCode::Escape => {
                if self.focused_mut().is_empty() {
                    Outcome::Back
                } else {
                    self.focused_mut().clear();
                    Outcome::Command(Command::None)
                }
            }
            KeyCode::Backspace => {
                self.focused_mut().pop();
                Outcome::Command(Command::None)
            }
            KeyCode::Char(c) if !key.ctrl() && !key.alt() => {
                self.focused_mut().push(c);
                Outcome::Command(Command::None)
            }
            _ => Outcome::Command(Command::None),
        }
    }

    /// A login attempt finished. Success is handled by the root reducer
    /// (it stores the user and navigates back); failure lands here.
    pub fn on_failed(&mut self, error: String) {
        self.submitting = false;
        self.error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grind_store::Config;
    use std::collections::BTreeSet;

    struct Fixture {
        config: Config,
        bookmarks: BTreeSet<u64>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: Config::default(),
                bookmarks: BTreeSet::new(),
            }
        }

        fn ctx(&mut self) -> Ctx<'_> {
            Ctx {
                width: 80,
                height: 24,
                user: None,
                config: &self.config,
                bookmarks: &mut self.bookmarks,
            }
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    fn type_text(login: &mut LoginModel, fx: &mut Fixture, text: &str) {
        for c in text.chars() {
            login.on_key(&key(KeyCode::Char(c)), &mut fx.ctx());
        }
    }

    #[test]
    fn typing_fills_focused_field() {
        let mut fx = Fixture::new();
        let mut login = LoginModel::default();
        type_text(&mut login, &mut fx, "abc");
        login.on_key(&key(KeyCode::Tab), &mut fx.ctx());
        type_text(&mut login, &mut fx, "xyz");
        assert_eq!(login.session, "abc");
        assert_eq!(login.csrf, "xyz");
    }

    #[test]
    fn q_is_text_not_a_binding() {
        let mut fx = Fixture::new();
        let mut login = LoginModel::default();
        let outcome = login.on_key(&key(KeyCode::Char('q')), &mut fx.ctx());
        assert!(matches!(outcome, Outcome::Command(Command::None)));
        assert_eq!(login.session, "q");
    }

    #[test]
    fn escape_clears_field_then_backs_out() {
        let mut fx = Fixture::new();
        let mut login = LoginModel::default();
        type_text(&mut login, &mut fx, "token");
        let outcome = login.on_key(&key(KeyCode::Escape), &mut fx.ctx());
        assert!(matches!(outcome, Outcome::Command(Command::None)));
        assert!(login.session.is_empty());

        let outcome = login.on_key(&key(KeyCode::Escape), &mut fx.ctx());
        assert!(matches!(outcome, Outcome::Back));
    }

    #[test]
    fn enter_requires_both_tokens() {
        let mut fx = Fixture::new();
        let mut login = LoginModel::default();
        type_text(&mut login, &mut fx, "session-only");
        let outcome = login.on_key(&key(KeyCode::Enter), &mut fx.ctx());
        assert!(matches!(outcome, Outcome::Command(Command::None)));
        assert!(login.error.is_some());
        assert!(!login.submitting);
    }

    #[test]
    fn enter_submits_when_complete() {
        let mut fx = Fixture::new();
        let mut login = LoginModel::default();
        type_text(&mut login, &mut fx, "s");
        login.on_key(&key(KeyCode::Tab), &mut fx.ctx());
        type_text(&mut login, &mut fx, "c");
        let outcome = login.on_key(&key(KeyCode::Enter), &mut fx.ctx());
        assert!(login.submitting);
        assert!(matches!(outcome, Outcome::Command(Command::Login { .. })));
    }

    #[test]
    fn failure_reenables_the_form() {
        let mut fx = Fixture::new();
        let mut login = LoginModel::default();
        login.submitting = true;
        login.on_failed("bad token".into());
        assert!(!login.submitting);
        assert_eq!(login.error.as_deref(), Some("bad token"));
        // Form accepts input again.
        login.on_key(&key(KeyCode::Char('x')), &mut fx.ctx());
        assert_eq!(login.session, "x");
    }
}
