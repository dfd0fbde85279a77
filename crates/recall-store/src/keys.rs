//! Key encoding for the key-value store.

use recall_core::{Month, PracticeDate, UserId};

use crate::schema::{ns, SEPARATOR};

/// Key of a user's daily score record.
#[must_use]
pub fn daily_score_key(user_id: &UserId, date: PracticeDate) -> String {
    format!("{}{SEPARATOR}{user_id}{SEPARATOR}{date}", ns::SCORE)
}

/// Key of a user's month index.
#[must_use]
pub fn month_index_key(user_id: &UserId, month: Month) -> String {
    format!("{}{SEPARATOR}{user_id}{SEPARATOR}{month}", ns::SCORE_INDEX)
}

/// Key of an account record. The email must already be normalized.
#[must_use]
pub fn user_key(email: &str) -> String {
    format!("{}{SEPARATOR}{email}", ns::USER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        "0b7e3c52-7a8f-4f0c-8d6e-3a2b1c0d9e8f".parse().unwrap()
    }

    #[test]
    fn daily_score_key_format() {
        let key = daily_score_key(&user(), "2024-03-01".parse().unwrap());
        assert_eq!(
            key,
            "memory:score:0b7e3c52-7a8f-4f0c-8d6e-3a2b1c0d9e8f:2024-03-01"
        );
    }

    #[test]
    fn month_index_key_format() {
        let key = month_index_key(&user(), "2024-03".parse().unwrap());
        assert_eq!(
            key,
            "memory:score-index:0b7e3c52-7a8f-4f0c-8d6e-3a2b1c0d9e8f:2024-03"
        );
    }

    #[test]
    fn user_key_format() {
        assert_eq!(user_key("ada@example.com"), "memory:user:ada@example.com");
    }

    #[test]
    fn namespaces_do_not_prefix_each_other_with_separator() {
        // "memory:score:" must never match an index key.
        let index = month_index_key(&user(), "2024-03".parse().unwrap());
        assert!(!index.starts_with(&format!("{}{SEPARATOR}", ns::SCORE)));
    }
}
