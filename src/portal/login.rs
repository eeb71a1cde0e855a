use std::sync::Arc;

pub const LOGIN_TITLE: &str = "Log in to book workout";
pub const LOGIN_DESCRIPTION: &str = "You must be logged in to book a workout. \
Please log in to access available slots and book your session.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginChoice {
    Cancel,
    LogIn,
}

impl LoginChoice {
    pub fn label(&self) -> &'static str {
        match self {
            LoginChoice::Cancel => "Cancel",
            LoginChoice::LogIn => "Log In",
        }
    }
}

pub trait LoginHost: Send + Sync {
    fn login(&self);

    fn closed(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub title: &'static str,
    pub description: &'static str,
    pub choices: [LoginChoice; 2],
}

/// Prompt shown to anonymous visitors who try to book a workout.
/// The host decides what happens after `login`; the prompt only closes on cancel.
pub struct LoginPrompt<H: LoginHost> {
    host: Arc<H>,
    open: bool,
}

impl<H: LoginHost> LoginPrompt<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self { host, open: false }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn view(&self) -> Option<LoginView> {
        self.open.then_some(LoginView {
            title: LOGIN_TITLE,
            description: LOGIN_DESCRIPTION,
            choices: [LoginChoice::Cancel, LoginChoice::LogIn],
        })
    }

    pub fn choose(&mut self, choice: LoginChoice) {
        if !self.open {
            return;
        }
        match choice {
            LoginChoice::Cancel => self.dismiss(),
            LoginChoice::LogIn => self.host.login(),
        }
    }

    /// Close button or backdrop click
    pub fn dismiss(&mut self) {
        if self.open {
            self.open = false;
            self.host.closed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counts {
        logins: AtomicUsize,
        closes: AtomicUsize,
    }

    impl LoginHost for Counts {
        fn login(&self) {
            self.logins.fetch_add(1, Ordering::SeqCst);
        }

        fn closed(&self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn closed_prompt_renders_nothing_and_ignores_choices() {
        let host = Arc::new(Counts::default());
        let mut prompt = LoginPrompt::new(host.clone());

        assert_eq!(prompt.view(), None);
        prompt.choose(LoginChoice::LogIn);
        assert_eq!(host.logins.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn login_choice_notifies_host_without_closing() {
        let host = Arc::new(Counts::default());
        let mut prompt = LoginPrompt::new(host.clone());
        prompt.open();

        let view = prompt.view().unwrap();
        assert_eq!(view.title, "Log in to book workout");
        assert_eq!(view.choices.map(|c| c.label()), ["Cancel", "Log In"]);

        prompt.choose(LoginChoice::LogIn);
        assert_eq!(host.logins.load(Ordering::SeqCst), 1);
        assert!(prompt.is_open());
    }

    #[test]
    fn cancel_closes_once() {
        let host = Arc::new(Counts::default());
        let mut prompt = LoginPrompt::new(host.clone());
        prompt.open();

        prompt.choose(LoginChoice::Cancel);
        prompt.dismiss();
        assert_eq!(host.closes.load(Ordering::SeqCst), 1);
        assert!(!prompt.is_open());
    }
}
