use crate::FormSession;

/// Trait for frontends that present a form session to a user.
///
/// A backend owns the presentation and the event loop: it feeds user input to
/// the session, performs the `Command`s the session returns, and reports their
/// results through `FormSession::apply`. It returns when the user leaves the form.
pub trait FormBackend {
    /// The error type for this backend.
    type Error: Into<anyhow::Error>;

    /// Drive `session` until the user is done with it.
    fn run(&self, session: &mut FormSession) -> Result<(), Self::Error>;
}
