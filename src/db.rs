// src/db.rs

pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod mission_repo;
pub use mission_repo::MissionRepository;
pub mod objective_repo;
pub use objective_repo::ObjectiveRepository;
pub mod profile_repo;
pub use profile_repo::ProfileRepository;
pub mod commission_repo;
pub use commission_repo::CommissionRepository;
pub mod note_repo;
pub use note_repo::NoteRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;

/// `%termo%` para ILIKE, com `\`, `%` e `_` do usuário escapados (usar `ESCAPE '\'`).
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_typed_by_the_user_are_literal() {
        assert_eq!(contains_pattern("acme"), "%acme%");
        assert_eq!(contains_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }
}
