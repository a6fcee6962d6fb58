//! Detection of account-state failures (banned / suspended) in sign-in
//! rejections, so the UI can show support or reactivation copy instead of
//! the bare message.

use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::remote::ResourceResult;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountNotice {
    /// Permanently banned; the user should contact support.
    Banned,
    /// Temporarily suspended, with the reactivation date when the server
    /// mentions one.
    Suspended { until: Option<Date> },
}

impl AccountNotice {
    pub fn from_result<T>(res: &ResourceResult<T>) -> Option<Self> {
        if res.is_success {
            return None;
        }
        Self::detect(&res.message, &res.errors)
    }

    pub fn detect(message: &str, errors: &[String]) -> Option<Self> {
        let texts = std::iter::once(message).chain(errors.iter().map(String::as_str));
        let mut suspended: Option<Option<Date>> = None;
        for text in texts {
            let lower = text.to_lowercase();
            if lower.contains("banned") {
                return Some(Self::Banned);
            }
            if lower.contains("suspended") && suspended.flatten().is_none() {
                suspended = Some(find_date(text));
            }
        }
        suspended.map(|until| Self::Suspended { until })
    }

    /// User-facing copy shown next to the server's message.
    pub fn guidance(&self) -> String {
        match self {
            Self::Banned => {
                "This account has been banned. Contact support if you believe this is a mistake."
                    .to_string()
            }
            Self::Suspended { until: Some(date) } => {
                let fmt = format_description!("[month repr:long] [day padding:none], [year]");
                let when = date.format(&fmt).unwrap_or_else(|_| date.to_string());
                format!("This account is suspended until {}.", when)
            }
            Self::Suspended { until: None } => {
                "This account is suspended. Contact support for the reactivation date."
                    .to_string()
            }
        }
    }
}

fn find_date(text: &str) -> Option<Date> {
    let day = format_description!("[year]-[month]-[day]");
    text.split(|c: char| c.is_whitespace() || c == ',' || c == '(' || c == ')')
        .map(|w| w.trim_end_matches(['.', ';', ':']))
        .filter(|w| !w.is_empty())
        .find_map(|word| {
            OffsetDateTime::parse(word, &time::format_description::well_known::Rfc3339)
                .map(|dt| dt.date())
                .ok()
                .or_else(|| word.get(..10).and_then(|head| Date::parse(head, &day).ok()))
        })
}

#[cfg(test)]
#[path = "tests/account_state_tests.rs"]
mod tests;
