//! Reference-catalog seed data.
//!
//! Mirrors the `seed_reference_data` migration so the in-memory store
//! starts from the same catalogs as a freshly-migrated database.

use crate::model::reference::{Catalogs, ClientStatus, Language, Pronoun, SexValue};

fn status(
    code: &str,
    name: &str,
    description: &str,
    display_order: i32,
    is_active: bool,
) -> ClientStatus {
    ClientStatus {
        code: code.to_owned(),
        name: name.to_owned(),
        description: Some(description.to_owned()),
        is_active,
        display_order: Some(display_order),
        color_hex: None,
    }
}

fn lang(code: &str, name: &str, native_name: &str, display_order: i32) -> Language {
    Language {
        code: code.to_owned(),
        name: name.to_owned(),
        native_name: Some(native_name.to_owned()),
        is_active: true,
        display_order: Some(display_order),
    }
}

fn pronoun(code: &str, display_text: &str, display_order: i32) -> Pronoun {
    Pronoun {
        code: code.to_owned(),
        display_text: display_text.to_owned(),
        is_active: true,
        display_order: Some(display_order),
    }
}

fn sex(code: &str, name: &str, display_order: i32) -> SexValue {
    SexValue {
        code: code.to_owned(),
        name: name.to_owned(),
        is_active: true,
        display_order: Some(display_order),
    }
}

/// ## Summary
/// Builds the seeded reference catalogs.
#[must_use]
pub fn reference_catalogs() -> Catalogs {
    Catalogs {
        client_statuses: vec![
            status("active", "Active", "Currently receiving services", 1, true),
            status("inactive", "Inactive", "Not currently active", 2, true),
            status("pending", "Pending", "Pending intake or assessment", 3, true),
            status("waitlisted", "Waitlisted", "On waitlist for services", 4, true),
            status(
                "closed",
                "Closed",
                "Case closed, services completed or discontinued",
                5,
                true,
            ),
            status("deceased", "Deceased", "Client is deceased", 6, false),
            status("deleted", "Deleted", "Client record soft deleted", 99, false),
        ],
        languages: vec![
            lang("en-NZ", "English (New Zealand)", "English", 1),
            lang("mi-NZ", "Te Reo Māori", "Te Reo Māori", 2),
            lang("sm-NZ", "Samoan (New Zealand)", "Gagana Samoa", 3),
            lang("zh-CN", "Mandarin", "普通话", 4),
            lang("hi-IN", "Hindi", "हिन्दी", 5),
            lang("fr-FR", "French", "Français", 6),
            lang("de-DE", "German", "Deutsch", 7),
            lang("ko-KR", "Korean", "한국어", 8),
            lang("ja-JP", "Japanese", "日本語", 9),
            lang("other", "Other", "Other", 99),
        ],
        pronouns: vec![
            pronoun("he-him", "He/Him", 1),
            pronoun("she-her", "She/Her", 2),
            pronoun("they-them", "They/Them", 3),
            pronoun("ze-hir", "Ze/Hir", 4),
            pronoun("use-name", "Use My Name", 5),
            pronoun("prefer-not-say", "Prefer Not to Say", 6),
            pronoun("other", "Other", 99),
        ],
        sex_values: vec![
            sex("male", "Male", 1),
            sex("female", "Female", 2),
            sex("intersex", "Intersex", 3),
            sex("unknown", "Unknown", 4),
            sex("prefer-not-say", "Prefer Not to Say", 5),
        ],
    }
}
