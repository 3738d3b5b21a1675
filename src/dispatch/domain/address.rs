//! Mail address normalisation.
//!
//! Hosts report addresses either bare (`jane@example.com`) or with a display
//! name (`Jane Doe <jane@example.com>`). The regify application only ever
//! wants the bare form.

/// Placeholder returned by [`extract_mail`] when no address can be found.
const UNPARSEABLE_ADDRESS: &str = "?";

/// A parsed mailbox with display name and address.
///
/// When the input carries no display name the address doubles as the name,
/// so both fields are always populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAddress {
    name: String,
    email: String,
}

impl MailAddress {
    /// Parses `Name <address>` or a bare address.
    ///
    /// Returns `None` when the input holds nothing shaped like
    /// `local@domain.tld`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        Self::parse_named(input).or_else(|| Self::parse_bare(input))
    }

    fn parse_named(input: &str) -> Option<Self> {
        let (name, rest) = input.split_once('<')?;
        let (candidate, _) = rest.split_once('>')?;
        if !is_address(candidate) {
            return None;
        }
        let trimmed_name = name.trim().trim_matches('"').trim();
        let display = if trimmed_name.is_empty() {
            candidate
        } else {
            trimmed_name
        };
        Some(Self {
            name: display.to_owned(),
            email: candidate.to_owned(),
        })
    }

    fn parse_bare(input: &str) -> Option<Self> {
        input
            .split_whitespace()
            .map(|token| token.trim_matches(|c: char| matches!(c, '<' | '>' | '"' | '\'' | ',' | ';')))
            .find(|token| is_address(token))
            .map(|address| Self {
                name: address.to_owned(),
                email: address.to_owned(),
            })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the bare address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Reduces `input` to its bare address, or `"?"` when none is present.
#[must_use]
pub fn extract_mail(input: &str) -> String {
    MailAddress::parse(input).map_or_else(|| UNPARSEABLE_ADDRESS.to_owned(), |mailbox| mailbox.email)
}

/// Returns the file name component of a Windows or POSIX path.
#[must_use]
pub fn file_part(path: &str) -> &str {
    let after_backslash = path.rsplit('\\').next().unwrap_or(path);
    after_backslash.rsplit('/').next().unwrap_or(after_backslash)
}

fn is_address(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let last = domain.len().saturating_sub(1);
    domain
        .char_indices()
        .any(|(index, character)| character == '.' && index > 0 && index < last)
}
