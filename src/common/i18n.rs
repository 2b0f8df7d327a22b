// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LANG: &str = "en";

const EN: &[(&str, &str)] = &[
    ("validation_failed", "One or more fields are invalid."),
    ("field_required", "The field '{field}' is required."),
    ("field_invalid", "The field '{field}' is invalid: {reason}."),
    ("invalid_body", "Invalid request body."),
    ("invalid_credentials", "Invalid credentials."),
    ("authentication_required", "Authentication required."),
    ("too_many_requests", "Too many requests. Try again later."),
    ("too_many_login_attempts", "Too many login attempts. Try again in 15 minutes."),
    ("internal_error", "An unexpected error occurred."),
    ("client_not_found", "Client not found or access denied."),
    ("mission_not_found", "Mission not found."),
    ("objective_not_found", "Objective not found."),
    ("profile_not_found", "Profile not found."),
    ("commission_not_found", "Commission settings not found."),
    ("objective_exists", "An objective already exists for this month and year."),
    ("commission_exists", "Commission settings already exist for this user."),
    ("profile_in_use", "This profile still owns records and cannot be deleted."),
    ("reason.required", "required"),
    ("reason.too_long", "too long"),
    ("reason.not_a_number", "not a number"),
    ("reason.not_an_integer", "not an integer"),
    ("reason.must_be_non_negative", "must be zero or greater"),
    ("reason.out_of_range_0_100", "must be between 0 and 100"),
    ("reason.out_of_range", "is too large"),
    ("numeric_out_of_range", "A numeric value is out of range."),
    ("reason.invalid_month", "must be a month between 01 and 12"),
    ("reason.invalid_year", "must be a plausible year"),
    ("reason.invalid_status", "must be pending, in_progress, completed or paid"),
    ("reason.invalid_role", "must be admin, commercial or developer"),
    ("reason.invalid_uuid", "must be a UUID"),
    ("reason.invalid_date", "must be a date in YYYY-MM-DD format"),
    ("reason.invalid_email", "must be a valid e-mail address"),
    ("reason.unknown_client", "does not reference an existing client"),
    ("reason.unknown_profile", "does not reference an existing profile"),
    ("reason.length_1_50", "must be between 1 and 50 characters"),
    ("reason.length_1_100", "must be between 1 and 100 characters"),
    ("reason.length_1_255", "must be between 1 and 255 characters"),
];

const FR: &[(&str, &str)] = &[
    ("validation_failed", "Un ou plusieurs champs sont invalides."),
    ("field_required", "Le champ '{field}' est requis."),
    ("field_invalid", "Le champ '{field}' est invalide : {reason}."),
    ("invalid_body", "Corps de la requête invalide."),
    ("invalid_credentials", "Identifiants invalides."),
    ("authentication_required", "Authentification requise."),
    ("too_many_requests", "Trop de requêtes. Réessayez plus tard."),
    ("too_many_login_attempts", "Trop de tentatives de connexion. Réessayez dans 15 minutes."),
    ("internal_error", "Une erreur inattendue est survenue."),
    ("client_not_found", "Client non trouvé ou accès refusé."),
    ("mission_not_found", "Mission non trouvée."),
    ("objective_not_found", "Objectif non trouvé."),
    ("profile_not_found", "Profil non trouvé."),
    ("commission_not_found", "Paramètres de commission non trouvés."),
    ("objective_exists", "Un objectif existe déjà pour ce mois et cette année."),
    ("commission_exists", "Des paramètres de commission existent déjà pour cet utilisateur."),
    ("profile_in_use", "Ce profil possède encore des enregistrements et ne peut pas être supprimé."),
    ("reason.required", "requis"),
    ("reason.too_long", "trop long"),
    ("reason.not_a_number", "n'est pas un nombre"),
    ("reason.not_an_integer", "n'est pas un entier"),
    ("reason.must_be_non_negative", "doit être positif ou nul"),
    ("reason.out_of_range_0_100", "doit être entre 0 et 100"),
    ("reason.out_of_range", "est trop grand"),
    ("numeric_out_of_range", "Une valeur numérique est hors limites."),
    ("reason.invalid_month", "doit être un mois entre 01 et 12"),
    ("reason.invalid_year", "doit être une année plausible"),
    ("reason.invalid_status", "doit être pending, in_progress, completed ou paid"),
    ("reason.invalid_role", "doit être admin, commercial ou developer"),
    ("reason.invalid_uuid", "doit être un UUID"),
    ("reason.invalid_date", "doit être une date au format AAAA-MM-JJ"),
    ("reason.invalid_email", "doit être une adresse e-mail valide"),
    ("reason.unknown_client", "ne correspond à aucun client existant"),
    ("reason.unknown_profile", "ne correspond à aucun profil existant"),
    ("reason.length_1_50", "doit contenir entre 1 et 50 caractères"),
    ("reason.length_1_100", "doit contenir entre 1 et 100 caractères"),
    ("reason.length_1_255", "doit contenir entre 1 et 255 caractères"),
];

/// Catálogo de mensagens por idioma. Idioma desconhecido cai no inglês,
/// chave desconhecida volta como está.
#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

impl I18nStore {
    pub fn new() -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert("en", EN.iter().copied().collect());
        catalogs.insert("fr", FR.iter().copied().collect());
        Self { catalogs }
    }

    pub fn supports(&self, lang: &str) -> bool {
        self.catalogs.contains_key(lang)
    }

    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.catalogs
            .get(lang)
            .and_then(|catalog| catalog.get(key))
            .or_else(|| self.catalogs.get(DEFAULT_LANG).and_then(|c| c.get(key)))
            .map(|s| s.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    pub fn translate_with(&self, lang: &str, key: &str, args: &[(&str, &str)]) -> String {
        let mut message = self.translate(lang, key);
        for (name, value) in args {
            message = message.replace(&format!("{{{name}}}"), value);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn french_catalog_is_used_when_requested() {
        let store = I18nStore::new();
        assert_eq!(store.translate("fr", "invalid_credentials"), "Identifiants invalides.");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let store = I18nStore::new();
        assert_eq!(store.translate("de", "invalid_credentials"), "Invalid credentials.");
    }

    #[test]
    fn placeholders_are_filled() {
        let store = I18nStore::new();
        let msg = store.translate_with("en", "field_required", &[("field", "title")]);
        assert_eq!(msg, "The field 'title' is required.");
    }

    #[test]
    fn both_catalogs_have_the_same_keys() {
        let en: Vec<_> = EN.iter().map(|(k, _)| *k).collect();
        for (key, _) in FR {
            assert!(en.contains(key), "chave só em fr: {key}");
        }
        assert_eq!(EN.len(), FR.len());
    }
}
