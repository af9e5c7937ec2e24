//! Evaluator rule types and their construction from raw assignment records.

use std::marker::PhantomData;

use permcheck_core::{ActionDomain, AdaptError, DenyAssignmentRecord, RoleAssignmentRecord};

/// Patterns one role permission grants, minus its local exceptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantRule<D: ActionDomain> {
    pub actions: Vec<String>,
    pub not_actions: Vec<String>,
    _domain: PhantomData<D>,
}

impl<D: ActionDomain> GrantRule<D> {
    pub fn new<I, J>(actions: I, not_actions: J) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        J: IntoIterator,
        J::Item: Into<String>,
    {
        Self {
            actions: actions.into_iter().map(Into::into).collect(),
            not_actions: not_actions.into_iter().map(Into::into).collect(),
            _domain: PhantomData,
        }
    }
}

/// Patterns an explicit deny record blocks, minus its own exceptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenialRule<D: ActionDomain> {
    pub actions: Vec<String>,
    pub not_actions: Vec<String>,
    /// Identifier of the deny record, reported verbatim.
    pub id: String,
    _domain: PhantomData<D>,
}

impl<D: ActionDomain> DenialRule<D> {
    pub fn new<I, J>(id: impl Into<String>, actions: I, not_actions: J) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        J: IntoIterator,
        J::Item: Into<String>,
    {
        Self {
            actions: actions.into_iter().map(Into::into).collect(),
            not_actions: not_actions.into_iter().map(Into::into).collect(),
            id: id.into(),
            _domain: PhantomData,
        }
    }
}

/// Build one grant rule per permission block of every role assignment.
pub fn grant_rules<D: ActionDomain>(
    assignments: &[RoleAssignmentRecord],
) -> Result<Vec<GrantRule<D>>, AdaptError> {
    let mut rules = Vec::new();
    for (i, assignment) in assignments.iter().enumerate() {
        let label = assignment
            .id
            .as_deref()
            .or(assignment.role_definition_id.as_deref())
            .map(|id| format!("role assignment {id}"))
            .unwrap_or_else(|| format!("role assignment #{i}"));

        let permissions = assignment
            .permissions
            .as_ref()
            .ok_or_else(|| AdaptError::MissingField {
                record: label.clone(),
                field: "permissions",
            })?;

        for (j, permission) in permissions.iter().enumerate() {
            let record = format!("{label} permission[{j}]");
            let actions = D::actions(permission).ok_or_else(|| AdaptError::MissingField {
                record: record.clone(),
                field: D::ACTIONS_FIELD,
            })?;
            let not_actions =
                D::not_actions(permission).ok_or_else(|| AdaptError::MissingField {
                    record,
                    field: D::NOT_ACTIONS_FIELD,
                })?;
            rules.push(GrantRule::new(
                actions.iter().cloned(),
                not_actions.iter().cloned(),
            ));
        }
    }
    Ok(rules)
}

/// Build one denial rule per permission block of every deny assignment.
pub fn denial_rules<D: ActionDomain>(
    assignments: &[DenyAssignmentRecord],
) -> Result<Vec<DenialRule<D>>, AdaptError> {
    let mut rules = Vec::new();
    for (i, assignment) in assignments.iter().enumerate() {
        let fallback = format!("deny assignment #{i}");
        let id = assignment.id.as_deref().ok_or_else(|| AdaptError::MissingField {
            record: fallback.clone(),
            field: "id",
        })?;
        let label = format!("deny assignment {id}");

        let permissions = assignment
            .permissions
            .as_ref()
            .ok_or_else(|| AdaptError::MissingField {
                record: label.clone(),
                field: "permissions",
            })?;

        for (j, permission) in permissions.iter().enumerate() {
            let record = format!("{label} permission[{j}]");
            let actions = D::actions(permission).ok_or_else(|| AdaptError::MissingField {
                record: record.clone(),
                field: D::ACTIONS_FIELD,
            })?;
            let not_actions =
                D::not_actions(permission).ok_or_else(|| AdaptError::MissingField {
                    record,
                    field: D::NOT_ACTIONS_FIELD,
                })?;
            rules.push(DenialRule::new(
                id,
                actions.iter().cloned(),
                not_actions.iter().cloned(),
            ));
        }
    }
    Ok(rules)
}
