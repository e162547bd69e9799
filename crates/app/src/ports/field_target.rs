//! Field target port: the automation-facing surface of one instrument.

use labhub_domain::error::LabHubError;

/// An instrument widget as the scheduler sees it: a set of named string
/// fields plus a confirm action that pushes pending field values to the
/// physical device.
///
/// Implementations are plain single-threaded state; field access happens
/// only from the scheduler's cooperative tick, so there is nothing to
/// lock.
pub trait FieldTarget: Send {
    /// Human-readable name, e.g. "Methane Mass Flow Controller".
    fn name(&self) -> &str;

    /// Short identifier scripts address the instrument by, e.g. "ch4_mfc".
    fn nickname(&self) -> &str;

    /// Declared field names, in display order.
    fn field_names(&self) -> Vec<&str>;

    /// Whether `field` is one of the declared fields. Script loading
    /// checks this before any step is queued.
    fn has_field(&self, field: &str) -> bool;

    /// Current value of a field.
    ///
    /// # Errors
    ///
    /// Returns [`LabHubError::NotFound`] for an undeclared field.
    fn get_field(&self, field: &str) -> Result<String, LabHubError>;

    /// Overwrite a field's value.
    ///
    /// # Errors
    ///
    /// Returns [`LabHubError::NotFound`] for an undeclared field.
    fn set_field(&mut self, field: &str, value: &str) -> Result<(), LabHubError>;

    /// Apply the instrument's pending input fields, as the widget's
    /// confirm button would.
    ///
    /// # Errors
    ///
    /// Implementation-defined; a failure here is treated like any other
    /// failing automation action (logged, run continues).
    fn confirm(&mut self) -> Result<(), LabHubError>;
}
