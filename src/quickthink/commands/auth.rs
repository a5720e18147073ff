use crate::auth::{AuthOutcome, AuthService};
use crate::commands::{CmdMessage, CmdResult};

#[derive(Debug, Clone)]
pub enum AuthAction {
    SignUp { email: String, password: String },
    SignIn { email: String, password: String },
    SignOut,
    CurrentUser,
}

/// Run an auth action. `auth` is `None` when no auth service is configured.
pub fn run(auth: Option<&mut dyn AuthService>, action: AuthAction) -> CmdResult {
    let mut result = CmdResult::default();
    let Some(auth) = auth else {
        result.add_message(CmdMessage::error(
            "Authentication is not configured. Set auth-url and auth-key with `quickthink config`.",
        ));
        return result;
    };

    let (outcome, done, failed) = match &action {
        AuthAction::SignUp { email, password } => {
            (auth.sign_up(email, password), "Signed up", "Sign-up failed")
        }
        AuthAction::SignIn { email, password } => {
            (auth.sign_in(email, password), "Signed in", "Sign-in failed")
        }
        AuthAction::SignOut => (auth.sign_out(), "Signed out", "Sign-out failed"),
        AuthAction::CurrentUser => (auth.current_user(), "Signed in", "Not signed in"),
    };

    report(&mut result, outcome, done, failed);
    result
}

fn report(result: &mut CmdResult, outcome: AuthOutcome, done: &str, failed: &str) {
    if !outcome.success {
        let reason = outcome.error.as_deref().unwrap_or("unknown error");
        result.add_message(CmdMessage::error(format!("{}: {}", failed, reason)));
        return;
    }

    let message = match outcome.email() {
        Some(email) => format!("{} as {}", done, email),
        None => done.to_string(),
    };
    result.add_message(CmdMessage::success(message));
    result.user = outcome.user;
}
