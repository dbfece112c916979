//! Client-facing message lookup.
//!
//! Known failure identifiers map to localized human messages through a
//! static rule table; anything unrecognized falls back to a generic retry
//! message so raw payloads and bare status codes never reach a person.

use salvo::http::StatusCode;

struct FriendlyRule {
    /// Restrict the rule to one status; `None` matches any.
    status: Option<StatusCode>,
    error: &'static str,
    message: &'static str,
}

const RULES: [FriendlyRule; 5] = [
    FriendlyRule {
        status: Some(StatusCode::CONFLICT),
        error: "lawyer already registered with that email",
        message: "Ya existe un abogado registrado con ese email.",
    },
    FriendlyRule {
        status: None,
        error: "email is required",
        message: "El email es obligatorio.",
    },
    FriendlyRule {
        status: None,
        error: "fullName is required",
        message: "El nombre es obligatorio.",
    },
    FriendlyRule {
        status: None,
        error: "subject is required",
        message: "El asunto es obligatorio.",
    },
    FriendlyRule {
        status: None,
        error: "startsAtLocal is required",
        message: "La fecha/hora de inicio es obligatoria.",
    },
];

/// Shown when no rule matches; avoids leaking raw payloads.
pub const GENERIC_FAILURE: &str = "No se pudo completar la operación. Intentalo de nuevo.";

/// Shown for transport-level connectivity failures.
pub const CONNECTIVITY_FAILURE: &str = "No se pudo conectar con el servidor.";

/// ## Summary
/// Resolves the human message for a failure identifier.
#[must_use]
pub fn friendly_message(status: StatusCode, api_error: &str) -> &'static str {
    RULES
        .iter()
        .find(|rule| {
            rule.error == api_error && rule.status.is_none_or(|expected| expected == status)
        })
        .map_or(GENERIC_FAILURE, |rule| rule.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_lawyer_rule_requires_conflict_status() {
        assert_eq!(
            friendly_message(
                StatusCode::CONFLICT,
                "lawyer already registered with that email"
            ),
            "Ya existe un abogado registrado con ese email."
        );
        // Same string under another status falls through to the generic message.
        assert_eq!(
            friendly_message(
                StatusCode::BAD_REQUEST,
                "lawyer already registered with that email"
            ),
            GENERIC_FAILURE
        );
    }

    #[test]
    fn test_required_field_rules_match_any_status() {
        assert_eq!(
            friendly_message(StatusCode::BAD_REQUEST, "email is required"),
            "El email es obligatorio."
        );
        assert_eq!(
            friendly_message(StatusCode::BAD_REQUEST, "fullName is required"),
            "El nombre es obligatorio."
        );
        assert_eq!(
            friendly_message(StatusCode::BAD_REQUEST, "subject is required"),
            "El asunto es obligatorio."
        );
        assert_eq!(
            friendly_message(StatusCode::BAD_REQUEST, "startsAtLocal is required"),
            "La fecha/hora de inicio es obligatoria."
        );
    }

    #[test]
    fn test_unknown_errors_get_generic_message() {
        assert_eq!(
            friendly_message(StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
            GENERIC_FAILURE
        );
        assert_eq!(friendly_message(StatusCode::BAD_REQUEST, ""), GENERIC_FAILURE);
    }
}
