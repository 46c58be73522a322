// ==========================================
// Tournament Scoring - Reference Resolver
// ==========================================
// Natural key -> persisted entity, one lookup per row per entity.
// A miss rejects only the current row.
// ==========================================

use crate::domain::{Branch, Category, Modality, Person, RegistrationRow, Team, Tournament};
use crate::importer::error::RowError;
use crate::repository::{ReferenceLookup, RepositoryResult};

/// Entities every score row needs
#[derive(Debug, Clone)]
pub struct ResolvedScoreRefs {
    pub person: Person,
    pub category: Category,
    pub modality: Modality,
    pub branch: Branch,
}

/// Entities every registration row needs
#[derive(Debug, Clone)]
pub struct ResolvedRegistrationRefs {
    pub person: Person,
    pub tournament: Tournament,
    pub category: Category,
    pub modality: Modality,
    pub branch: Branch,
}

/// Turns a finder result into a row result.
///
/// None -> ReferenceNotFound, repository failure -> Unexpected
fn require<T>(
    found: RepositoryResult<Option<T>>,
    line: usize,
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<T, RowError> {
    match found {
        Ok(Some(entity_value)) => Ok(entity_value),
        Ok(None) => Err(RowError::ReferenceNotFound {
            line,
            entity,
            field,
            value: value.to_string(),
        }),
        Err(e) => Err(RowError::unexpected(line, e)),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceResolver;

impl ReferenceResolver {
    pub fn person<L: ReferenceLookup + ?Sized>(
        &self,
        lookup: &L,
        document: &str,
        line: usize,
    ) -> Result<Person, RowError> {
        require(
            lookup.find_person_by_document(document),
            line,
            "persona",
            "documento",
            document,
        )
    }

    pub fn tournament<L: ReferenceLookup + ?Sized>(
        &self,
        lookup: &L,
        name: &str,
        line: usize,
    ) -> Result<Tournament, RowError> {
        require(
            lookup.find_tournament_by_name(name),
            line,
            "torneo",
            "nombreTorneo",
            name,
        )
    }

    pub fn category<L: ReferenceLookup + ?Sized>(
        &self,
        lookup: &L,
        name: &str,
        line: usize,
    ) -> Result<Category, RowError> {
        require(
            lookup.find_category_by_name_active(name),
            line,
            "categoría",
            "categoria",
            name,
        )
    }

    pub fn modality<L: ReferenceLookup + ?Sized>(
        &self,
        lookup: &L,
        name: &str,
        line: usize,
    ) -> Result<Modality, RowError> {
        require(
            lookup.find_modality_by_name_active(name),
            line,
            "modalidad",
            "modalidad",
            name,
        )
    }

    /// Case-insensitive, unlike the other finders
    pub fn branch<L: ReferenceLookup + ?Sized>(
        &self,
        lookup: &L,
        name: &str,
        line: usize,
    ) -> Result<Branch, RowError> {
        require(
            lookup.find_branch_by_name_case_insensitive(name),
            line,
            "rama",
            "rama",
            name,
        )
    }

    pub fn team<L: ReferenceLookup + ?Sized>(
        &self,
        lookup: &L,
        name: &str,
        line: usize,
    ) -> Result<Team, RowError> {
        require(lookup.find_team_by_name(name), line, "equipo", "equipo", name)
    }

    /// person -> category -> modality -> branch, first miss wins.
    ///
    /// The team is resolved later, once the modality rule is known.
    pub fn resolve_score_refs<L: ReferenceLookup + ?Sized>(
        &self,
        lookup: &L,
        document: &str,
        category_name: &str,
        modality_name: &str,
        branch_name: &str,
        line: usize,
    ) -> Result<ResolvedScoreRefs, RowError> {
        let person = self.person(lookup, document, line)?;
        let category = self.category(lookup, category_name, line)?;
        let modality = self.modality(lookup, modality_name, line)?;
        let branch = self.branch(lookup, branch_name, line)?;

        Ok(ResolvedScoreRefs {
            person,
            category,
            modality,
            branch,
        })
    }

    /// person -> tournament -> category -> modality -> branch
    pub fn resolve_registration_refs<L: ReferenceLookup + ?Sized>(
        &self,
        lookup: &L,
        row: &RegistrationRow,
    ) -> Result<ResolvedRegistrationRefs, RowError> {
        let line = row.source_line;
        let person = self.person(lookup, &row.document, line)?;
        let tournament = self.tournament(lookup, &row.tournament_name, line)?;
        let category = self.category(lookup, &row.category_name, line)?;
        let modality = self.modality(lookup, &row.modality_name, line)?;
        let branch = self.branch(lookup, &row.branch_name, line)?;

        Ok(ResolvedRegistrationRefs {
            person,
            tournament,
            category,
            modality,
            branch,
        })
    }
}
