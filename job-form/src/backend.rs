use crate::FormController;

/// Trait for front ends that drive a form.
///
/// A backend turns user interaction (keystrokes, clicks, scripted steps)
/// into edits and submits on the controller. It returns when the user is
/// done; whatever snapshot the controller then holds is the result.
pub trait FormBackend {
    /// The error type for this backend.
    type Error: Into<anyhow::Error>;

    /// Run the interaction to completion.
    ///
    /// # Returns
    /// * `Ok(())` when the user leaves the form normally
    /// * `Err` on cancellation or backend failure
    fn drive(&self, controller: &mut FormController) -> Result<(), Self::Error>;
}
