//! Reconciliation controller implementation

use crate::{
    ApplyResult, GrantError, GrantedPrivilege, Grantee, GrantsRepository, MariaDbGrantsRepository,
    PrivilegeAction, PrivilegeCatalog, PrivilegeOperation, Result, StatementBuilder,
    StatementExecutor,
};
use std::sync::Arc;

/// Attempts made for each compensating statement before giving up on it
pub const COMPENSATION_ATTEMPTS: usize = 3;

/// Message recorded on earlier successes of a batch that was rolled back
pub const DISCARDED_NOTICE: &str =
    "Discarding changes because applying another privilege in the same batch failed";

/// One validated action with its statement and, when rollback is enabled,
/// the statement that undoes it
struct PlannedAction<'a> {
    action: &'a PrivilegeAction,
    statement: String,
    compensation: Option<String>,
}

/// Applies privilege changes through a [`StatementExecutor`]
///
/// Every executor call is awaited before the next one is issued; a batch is
/// one sequential task. Batches for the same grantee must not run
/// concurrently.
pub struct PrivilegesController {
    executor: Arc<dyn StatementExecutor>,
    repository: Arc<dyn GrantsRepository>,
    catalog: Arc<PrivilegeCatalog>,
    builder: StatementBuilder,
}

impl PrivilegesController {
    pub fn new(
        executor: Arc<dyn StatementExecutor>,
        repository: Arc<dyn GrantsRepository>,
        catalog: Arc<PrivilegeCatalog>,
    ) -> Self {
        Self {
            executor,
            repository,
            catalog,
            builder: StatementBuilder::new(),
        }
    }

    /// Controller reading baselines with `SHOW GRANTS` through the same executor
    pub fn mariadb(executor: Arc<dyn StatementExecutor>, catalog: Arc<PrivilegeCatalog>) -> Self {
        let repository = Arc::new(MariaDbGrantsRepository::new(
            executor.clone(),
            catalog.clone(),
        ));
        Self::new(executor, repository, catalog)
    }

    pub fn catalog(&self) -> &PrivilegeCatalog {
        &self.catalog
    }

    /// Apply a single action.
    ///
    /// A statement the server rejects yields a failed [`ApplyResult`] with the
    /// server's message. Invalid or unsupported privileges and transport
    /// failures are returned as errors.
    #[tracing::instrument(skip(self, action, grantee), fields(grantee = %grantee, privilege = %action.privilege, operation = %action.operation))]
    pub async fn apply_one(&self, action: &PrivilegeAction, grantee: &Grantee) -> Result<ApplyResult> {
        let statement = self.prepare(action, grantee)?;

        match self.run(&statement).await {
            Ok(()) => Ok(ApplyResult::succeeded(
                grantee.clone(),
                action.privilege.clone(),
                action.operation,
            )),
            Err(err) if err.is_remote_rejection() => {
                tracing::warn!(error = %err, "server rejected privilege change");
                Ok(ApplyResult::failed(
                    grantee.clone(),
                    action.privilege.clone(),
                    action.operation,
                    err.to_string(),
                ))
            }
            Err(err) => Err(err),
        }
    }

    /// Apply `actions` in order for one grantee.
    ///
    /// With `discard_on_fail`, a failure undoes every action the batch already
    /// applied, oldest first, and earlier results are reported as failed with
    /// [`DISCARDED_NOTICE`]. The batch stops at the first failure: a server
    /// rejection yields the results so far plus a failed result for the
    /// rejected action, any other failure is returned as an error after the
    /// rollback. Actions after the failing one are neither attempted nor
    /// reported.
    ///
    /// Every action is validated, and its compensation derived, before the
    /// first statement is sent.
    #[tracing::instrument(skip(self, actions, grantee), fields(grantee = %grantee, actions = actions.len()))]
    pub async fn apply_batch(
        &self,
        actions: &[PrivilegeAction],
        grantee: &Grantee,
        discard_on_fail: bool,
    ) -> Result<Vec<ApplyResult>> {
        if actions.is_empty() {
            return Ok(Vec::new());
        }

        grantee.validate()?;

        tracing::info!(discard_on_fail, "applying privilege batch");
        let baseline = self.repository.current_grants(grantee).await?;
        let plan = self.plan(actions, grantee, &baseline, discard_on_fail)?;

        let mut results = Vec::with_capacity(plan.len());
        let mut compensations: Vec<&str> = Vec::new();
        for planned in &plan {
            if let Err(cause) = self.run(&planned.statement).await {
                return self
                    .roll_back(cause, planned.action, grantee, results, &compensations, discard_on_fail)
                    .await;
            }
            results.push(ApplyResult::succeeded(
                grantee.clone(),
                planned.action.privilege.clone(),
                planned.action.operation,
            ));
            compensations.extend(planned.compensation.as_deref());
        }

        tracing::info!(applied = results.len(), "privilege batch applied");
        Ok(results)
    }

    /// Validate an action against its scope and the catalog, then render it
    fn prepare(&self, action: &PrivilegeAction, grantee: &Grantee) -> Result<String> {
        let privilege = &action.privilege;
        privilege.validate()?;
        self.catalog
            .ensure_supported(privilege.scope(), privilege.name())?;
        self.builder.build_for(action.operation, privilege, grantee)
    }

    fn plan<'a>(
        &self,
        actions: &'a [PrivilegeAction],
        grantee: &Grantee,
        baseline: &[GrantedPrivilege],
        discard_on_fail: bool,
    ) -> Result<Vec<PlannedAction<'a>>> {
        actions
            .iter()
            .map(|action| {
                let statement = self.prepare(action, grantee)?;
                let compensation = if discard_on_fail {
                    Some(compensation_for(&self.builder, action, grantee, baseline)?)
                } else {
                    None
                };
                Ok(PlannedAction {
                    action,
                    statement,
                    compensation,
                })
            })
            .collect()
    }

    async fn run(&self, statement: &str) -> Result<()> {
        tracing::debug!(statement, "executing privilege statement");
        self.executor.execute(statement).await.map_err(GrantError::from)
    }

    async fn run_with_retries(&self, statement: &str) -> Result<()> {
        let mut attempt = 1;
        loop {
            match self.run(statement).await {
                Ok(()) => return Ok(()),
                Err(err) if attempt < COMPENSATION_ATTEMPTS => {
                    tracing::warn!(statement, attempt, error = %err, "compensation attempt failed, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn roll_back(
        &self,
        cause: GrantError,
        action: &PrivilegeAction,
        grantee: &Grantee,
        mut results: Vec<ApplyResult>,
        compensations: &[&str],
        discard_on_fail: bool,
    ) -> Result<Vec<ApplyResult>> {
        tracing::warn!(
            error = %cause,
            privilege = %action.privilege,
            compensations = compensations.len(),
            "privilege batch failed, rolling back"
        );

        // Replayed in the order the actions were applied
        let mut first_failure: Option<(String, GrantError)> = None;
        for statement in compensations {
            if let Err(err) = self.run_with_retries(statement).await {
                tracing::error!(
                    statement = *statement,
                    attempts = COMPENSATION_ATTEMPTS,
                    error = %err,
                    "compensation abandoned"
                );
                if first_failure.is_none() {
                    first_failure = Some((statement.to_string(), err));
                }
            }
        }

        if discard_on_fail {
            if let Some((statement, err)) = first_failure {
                return Err(GrantError::CompensationFailed {
                    cause: Box::new(cause),
                    compensation: Box::new(err),
                    statement,
                });
            }
        }

        if !cause.is_remote_rejection() {
            return Err(cause);
        }

        if discard_on_fail {
            for result in &mut results {
                result.mark_discarded(DISCARDED_NOTICE);
            }
        }
        results.push(ApplyResult::failed(
            grantee.clone(),
            action.privilege.clone(),
            action.operation,
            cause.to_string(),
        ));
        Ok(results)
    }
}

/// The statement that restores the baseline after `action` is applied.
///
/// Granting a privilege the grantee lacked is undone by revoking it, and
/// revoking a privilege it held by granting it back. Granting a privilege
/// already held, or revoking one not held, changes nothing and has no
/// compensation.
pub(crate) fn compensation_for(
    builder: &StatementBuilder,
    action: &PrivilegeAction,
    grantee: &Grantee,
    baseline: &[GrantedPrivilege],
) -> Result<String> {
    let held = baseline
        .iter()
        .any(|granted| granted.grantee() == grantee && granted.privilege() == &action.privilege);

    match (action.operation, held) {
        (PrivilegeOperation::Grant, false) | (PrivilegeOperation::Revoke, true) => {
            builder.build_for(action.operation.inverse(), &action.privilege, grantee)
        }
        (PrivilegeOperation::Grant, true) => Err(GrantError::MissingCompensation(format!(
            "{} is already granted to {}",
            action.privilege, grantee
        ))),
        (PrivilegeOperation::Revoke, false) => Err(GrantError::MissingCompensation(format!(
            "{} is not granted to {}",
            action.privilege, grantee
        ))),
    }
}
