//! Add-on level domain types.

use std::fmt;
use thiserror::Error;

/// File extensions that mark an attachment as a regimail.
pub const REGIMAIL_EXTENSIONS: [&str; 2] = [".rgf", ".rgp"];

/// Returns `true` when `file_name` names a regimail container.
#[must_use]
pub fn is_regimail_name(file_name: &str) -> bool {
    REGIMAIL_EXTENSIONS
        .iter()
        .any(|extension| file_name.ends_with(extension))
}

/// Which helper window flavour to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    /// Create and send a regimail from a compose session.
    Send,
    /// Open the regimail attached to the selected message.
    Read,
}

impl WindowKind {
    /// Local page hosting the application frame.
    #[must_use]
    pub const fn page(self) -> &'static str {
        match self {
            Self::Send => "regifySendWindow.html",
            Self::Read => "regifyReadWindow.html",
        }
    }

    /// Application page loaded from the regify server.
    #[must_use]
    pub const fn app_page(self) -> &'static str {
        match self {
            Self::Send => "compose_thunderbird.html",
            Self::Read => "read_thunderbird.html",
        }
    }
}

/// What the helper window's frame should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSource {
    /// Load the application from this URL.
    Url(String),
    /// Show this inline document instead.
    Document(String),
}

/// User-facing refusals of the toolbar actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// Blind carbon copies cannot be sent as regimail.
    NoBcc,
    /// A regimail needs a subject.
    NoEmptySubject,
    /// A regimail needs at least one recipient.
    OneRecipient,
    /// The selected message carries no regimail.
    NoRegimail,
}

impl Notice {
    /// Message catalogue key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::NoBcc => "noBCC",
            Self::NoEmptySubject => "noEmptySubject",
            Self::OneRecipient => "oneRecipient",
            Self::NoRegimail => "noRegimail",
        }
    }

    /// English message text.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::NoBcc => "Regimail does not support BCC recipients. Please remove them.",
            Self::NoEmptySubject => "Please enter a subject before sending a regimail.",
            Self::OneRecipient => "A regimail needs at least one recipient.",
            Self::NoRegimail => "The selected message is not a regimail.",
        }
    }

    /// Whether the notice reports a failed action.
    #[must_use]
    pub const fn is_error(self) -> bool {
        !matches!(self, Self::NoRegimail)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A developer server given as `subdomain:port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeveloperServer {
    subdomain: String,
    port: u16,
}

/// Reasons a developer server setting is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeveloperServerError {
    /// The value is not `subdomain:port`.
    #[error("Invalid developer mode format. Use \"subdomain:port\"")]
    Format,
    /// The port is not an integer in `0..=65535`.
    #[error("Port number must be a valid integer between 0 and 65535")]
    Port,
}

impl DeveloperServer {
    /// Parses a `subdomain:port` setting.
    ///
    /// # Errors
    ///
    /// Returns [`DeveloperServerError::Format`] unless the value has exactly
    /// one colon and a non-empty subdomain, and
    /// [`DeveloperServerError::Port`] when the port is not a valid integer
    /// in `0..=65535`.
    pub fn parse(value: &str) -> Result<Self, DeveloperServerError> {
        let mut parts = value.split(':');
        let (Some(subdomain), Some(port), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(DeveloperServerError::Format);
        };
        if subdomain.trim().is_empty() {
            return Err(DeveloperServerError::Format);
        }
        let parsed_port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| DeveloperServerError::Port)?;
        Ok(Self {
            subdomain: subdomain.trim().to_owned(),
            port: parsed_port,
        })
    }

    /// Returns the subdomain.
    #[must_use]
    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }

    /// Returns the port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Base URL, including the trailing slash, under `domain`.
    #[must_use]
    pub fn base_url(&self, domain: &str) -> String {
        format!("https://{}.{domain}:{}/", self.subdomain, self.port)
    }
}
