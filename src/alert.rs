//! Alert fragments for displaying error messages to users.
//!
//! Alerts are rendered as small fixed-position cards and swapped into the
//! page's `#alert-container` by HTMX, either via `hx-target-error` on forms
//! or explicitly by an endpoint response.

use maud::{Markup, html};

/// Renders an error alert with a headline and optional details.
pub struct AlertTemplate<'a> {
    message: &'a str,
    details: &'a str,
}

impl<'a> AlertTemplate<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    /// Render the alert as markup suitable for swapping into
    /// `#alert-container`.
    pub fn into_html(self) -> Markup {
        html! {
            div
                class="p-4 mb-4 rounded-lg border shadow-lg bg-red-50 border-red-300 \
                text-red-800 dark:bg-gray-800 dark:border-red-800 dark:text-red-400"
                role="alert"
            {
                div class="flex items-center justify-between"
                {
                    span class="font-medium" { (self.message) }

                    button
                        type="button"
                        class="ms-2 -my-1.5 rounded-lg p-1.5 hover:bg-gray-200 dark:hover:bg-gray-700"
                        aria-label="Close"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "\u{2715}"
                    }
                }

                @if !self.details.is_empty() {
                    p class="mt-2 text-sm" { (self.details) }
                }
            }
        }
    }
}
