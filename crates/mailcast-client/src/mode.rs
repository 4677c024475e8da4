//! Single finite-state UI mode replacing per-modal boolean flags.
//!
//! Exactly one mode is active at a time, so illegal combinations (a
//! cancel confirmation behind an open recipients view, two stacked
//! modals) are unrepresentable. Transitions that skip a required step
//! are rejected with a validation error.

use crate::error::{ClientError, Result};

/// Exclusive view mode of the campaign dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiMode {
    /// No modal open.
    #[default]
    Idle,
    /// Choosing a template for a new campaign.
    SelectingTemplate,
    /// Reviewing the rendered preview of the chosen template.
    Previewing {
        /// Template being previewed.
        template_id: String,
    },
    /// Awaiting the final send confirmation.
    ConfirmingSend {
        /// Template the campaign will send.
        template_id: String,
    },
    /// Awaiting confirmation before cancelling an in-flight campaign.
    ConfirmingCancel {
        /// Campaign the cancel targets.
        campaign_id: String,
    },
    /// Browsing a campaign's recipient breakdown.
    ViewingRecipients {
        /// Campaign whose recipients are shown.
        campaign_id: String,
    },
}

impl UiMode {
    /// Open the template picker. Only legal from the idle state.
    ///
    /// # Errors
    ///
    /// Returns a validation error when another view is already open.
    pub fn begin_template_selection(&mut self) -> Result<()> {
        match self {
            Self::Idle => {
                *self = Self::SelectingTemplate;
                Ok(())
            }
            _ => Err(ClientError::validation("another view is already open")),
        }
    }

    /// Move from template selection to the rendered preview.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless template selection is open.
    pub fn begin_preview(&mut self, template_id: impl Into<String>) -> Result<()> {
        match self {
            Self::SelectingTemplate => {
                *self = Self::Previewing {
                    template_id: template_id.into(),
                };
                Ok(())
            }
            _ => Err(ClientError::validation(
                "preview requires an open template selection",
            )),
        }
    }

    /// Move from the preview to the send confirmation.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless a preview is open; the current
    /// mode is left untouched.
    pub fn begin_send_confirmation(&mut self) -> Result<()> {
        match std::mem::take(self) {
            Self::Previewing { template_id } => {
                *self = Self::ConfirmingSend { template_id };
                Ok(())
            }
            previous => {
                *self = previous;
                Err(ClientError::validation(
                    "send confirmation requires an open preview",
                ))
            }
        }
    }

    /// Ask for confirmation before cancelling a campaign. Only legal from
    /// the idle state; the campaign list is not a modal.
    ///
    /// # Errors
    ///
    /// Returns a validation error when another view is already open.
    pub fn begin_cancel_confirmation(&mut self, campaign_id: impl Into<String>) -> Result<()> {
        match self {
            Self::Idle => {
                *self = Self::ConfirmingCancel {
                    campaign_id: campaign_id.into(),
                };
                Ok(())
            }
            _ => Err(ClientError::validation("another view is already open")),
        }
    }

    /// Open a campaign's recipient breakdown. Only legal from idle.
    ///
    /// # Errors
    ///
    /// Returns a validation error when another view is already open.
    pub fn view_recipients(&mut self, campaign_id: impl Into<String>) -> Result<()> {
        match self {
            Self::Idle => {
                *self = Self::ViewingRecipients {
                    campaign_id: campaign_id.into(),
                };
                Ok(())
            }
            _ => Err(ClientError::validation("another view is already open")),
        }
    }

    /// Dismiss whatever is open and return to idle. Always legal.
    pub fn dismiss(&mut self) {
        *self = Self::Idle;
    }

    /// True when no modal is open.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_walks_send_flow() {
        let mut mode = UiMode::default();
        mode.begin_template_selection().expect("idle -> selecting");
        mode.begin_preview("T1").expect("selecting -> previewing");
        mode.begin_send_confirmation()
            .expect("previewing -> confirming");
        assert_eq!(
            mode,
            UiMode::ConfirmingSend {
                template_id: "T1".into()
            }
        );
        mode.dismiss();
        assert!(mode.is_idle());
    }

    #[test]
    fn stacked_modals_are_rejected() {
        let mut mode = UiMode::Idle;
        mode.view_recipients("E1").expect("idle -> recipients");
        assert!(mode.begin_cancel_confirmation("E1").is_err());
        assert!(mode.begin_template_selection().is_err());
        // The rejected transitions must not clobber the open view.
        assert_eq!(
            mode,
            UiMode::ViewingRecipients {
                campaign_id: "E1".into()
            }
        );
    }

    #[test]
    fn send_confirmation_requires_preview() {
        let mut mode = UiMode::Idle;
        assert!(mode.begin_send_confirmation().is_err());
        assert!(mode.is_idle());

        mode.begin_template_selection().expect("idle -> selecting");
        assert!(mode.begin_send_confirmation().is_err());
        assert_eq!(mode, UiMode::SelectingTemplate);
    }

    #[test]
    fn dismiss_is_always_legal() {
        let mut mode = UiMode::Idle;
        mode.dismiss();
        assert!(mode.is_idle());

        mode.begin_cancel_confirmation("E2")
            .expect("idle -> confirming cancel");
        mode.dismiss();
        assert!(mode.is_idle());
    }
}
