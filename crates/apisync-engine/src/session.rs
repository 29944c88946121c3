//! Reconciliation session
//!
//! Owns the accepted local snapshot of every configured data source, the
//! freshly fetched remote of the active one, and the latest diff. Operators
//! inspect the diff and accept changes through the `merge_*` methods; nothing
//! reaches disk until [`ReconciliationSession::save_lock`] or
//! [`ReconciliationSession::regenerate`].

#![allow(clippy::result_large_err)]

use apisync_core::diff::{diff_data_sources, DiffReport};
use apisync_core::errors::{ApiSyncError, ExError, ExErrorKind};
use apisync_core::model::{DataSource, EndpointRef};
use apisync_core::ops::{self, MergeOutcome, MergeReport};
use apisync_core::render::CodeGenerator;
use apisync_core::rules;
use apisync_core::{log_op_end, log_op_error, log_op_start};
use apisync_core_types::SessionId;
use futures::future::join_all;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::{ApiSyncConfig, DataSourceConfig};
use crate::errors::{config_not_found, join_error, no_remote, Result};
use crate::fetcher::RemoteFetcher;

/// Run blocking store I/O off the async executor
async fn blocking<T, F>(op: &'static str, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| join_error(op, e))?
}

/// Combined digest of every local source, in slot order
fn sources_digest(sources: &[DataSource]) -> String {
    sources
        .iter()
        .map(DataSource::content_digest)
        .collect::<Vec<_>>()
        .join(":")
}

pub struct ReconciliationSession {
    id: SessionId,
    config: ApiSyncConfig,
    fetcher: Box<dyn RemoteFetcher>,
    /// Index into `config.origins`; `None` after selecting an unknown name
    current: Option<usize>,
    /// One slot per configured origin, in config order
    all_local: Vec<DataSource>,
    remote: Option<DataSource>,
    diffs: DiffReport,
    /// Digest of what the lock on disk holds, when known
    saved_digest: Option<String>,
}

impl ReconciliationSession {
    /// The first configured origin becomes the active one
    pub fn new(config: ApiSyncConfig, fetcher: impl RemoteFetcher + 'static) -> Self {
        let all_local = config
            .origins
            .iter()
            .map(|o| DataSource::new(o.name.clone()))
            .collect();
        let current = if config.origins.is_empty() { None } else { Some(0) };
        Self {
            id: SessionId::new(),
            config,
            fetcher: Box::new(fetcher),
            current,
            all_local,
            remote: None,
            diffs: DiffReport::default(),
            saved_digest: None,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn config(&self) -> &ApiSyncConfig {
        &self.config
    }

    fn out_dir(&self) -> PathBuf {
        self.config.out_dir.clone()
    }

    fn current_index(&self, op: &str) -> Result<usize> {
        self.current.ok_or_else(|| config_not_found(op, None))
    }

    /// # Errors
    /// `ConfigNotFound` when no data source is active.
    pub fn current_config(&self) -> Result<&DataSourceConfig> {
        let idx = self.current_index("current_config")?;
        Ok(&self.config.origins[idx])
    }

    /// Accepted snapshot of the active data source
    ///
    /// # Errors
    /// `ConfigNotFound` when no data source is active.
    pub fn local(&self) -> Result<&DataSource> {
        let idx = self.current_index("local")?;
        Ok(&self.all_local[idx])
    }

    pub fn all_local(&self) -> &[DataSource] {
        &self.all_local
    }

    pub fn remote(&self) -> Option<&DataSource> {
        self.remote.as_ref()
    }

    /// Report of the last [`calc_diffs`](Self::calc_diffs)
    pub fn diffs(&self) -> &DiffReport {
        &self.diffs
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Load the lock and fetch the active remote.
    ///
    /// Without a lock every origin is fetched concurrently and the results
    /// become the local sources; the active one doubles as remote.
    ///
    /// # Errors
    /// `ConfigNotFound` without an active source; `Fetch` from the fetcher.
    pub async fn ready(&mut self) -> Result<()> {
        let start = Instant::now();
        log_op_start!("ready", session_id = %self.id);

        let result = self.ready_inner().await;
        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(()) => {
                log_op_end!("ready", duration_ms = duration_ms);
            }
            Err(err) => log_op_error!("ready", err.clone(), duration_ms = duration_ms),
        }
        result
    }

    async fn ready_inner(&mut self) -> Result<()> {
        let idx = self.current_index("ready")?;
        let out_dir = self.out_dir();

        if blocking("ready", move || Ok(apisync_store::lock_exists(&out_dir))).await? {
            self.load_local().await;
            return self.fetch_remote().await;
        }

        tracing::info!(
            origins = self.config.origins.len(),
            "no lock found, fetching every origin"
        );
        let fetches = self
            .config
            .origins
            .iter()
            .map(|origin| self.fetcher.fetch(origin));
        let sources = join_all(fetches)
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        self.all_local = sources;
        self.remote = Some(self.all_local[idx].clone());
        Ok(())
    }

    /// Switch the active data source, reload local and re-fetch remote.
    ///
    /// # Errors
    /// `ConfigNotFound` for an unknown name; the session is then left without
    /// an active source. `Fetch` from the fetcher.
    pub async fn select_data_source(&mut self, name: &str) -> Result<()> {
        log_op_start!("select_data_source", data_source = name);

        let Some(idx) = self.config.origins.iter().position(|o| o.name == name) else {
            self.current = None;
            self.remote = None;
            self.diffs = DiffReport::default();
            let err = config_not_found("select_data_source", Some(name));
            log_op_error!("select_data_source", err.clone(), duration_ms = 0u64);
            return Err(err);
        };

        let start = Instant::now();
        self.current = Some(idx);
        self.remote = None;
        self.diffs = DiffReport::default();
        self.load_local().await;
        let result = self.fetch_remote().await;

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(()) => {
                log_op_end!("select_data_source", duration_ms = duration_ms);
            }
            Err(err) => log_op_error!("select_data_source", err.clone(), duration_ms = duration_ms),
        }
        result
    }

    /// Reload every local slot from the lock. Without a lock the slots are
    /// kept as they are; an unreadable lock leaves empty sources behind and
    /// is only logged.
    async fn load_local(&mut self) {
        let out_dir = self.out_dir();
        let loaded = blocking("load_lock", move || apisync_store::load_lock(&out_dir)).await;

        match loaded {
            Ok(mut sources) => {
                self.all_local = self
                    .config
                    .origins
                    .iter()
                    .map(|origin| {
                        sources
                            .iter()
                            .position(|ds| ds.name == origin.name)
                            .map(|pos| sources.swap_remove(pos))
                            .unwrap_or_else(|| DataSource::new(origin.name.clone()))
                    })
                    .collect();
                self.saved_digest = Some(sources_digest(&self.all_local));
            }
            Err(err) if err.kind() == ExErrorKind::NotFound => {
                tracing::debug!("no lock on disk, keeping local sources");
            }
            Err(err) => {
                tracing::warn!(
                    err.code = err.code(),
                    error = %err,
                    "cannot load lock, falling back to empty local sources"
                );
                self.all_local = self
                    .config
                    .origins
                    .iter()
                    .map(|o| DataSource::new(o.name.clone()))
                    .collect();
                self.saved_digest = None;
            }
        }
    }

    /// Fetch the active remote. A failed fetch leaves `remote` unchanged.
    ///
    /// # Errors
    /// `ConfigNotFound` without an active source; `Fetch` from the fetcher.
    pub async fn fetch_remote(&mut self) -> Result<()> {
        let idx = self.current_index("fetch_remote")?;
        let remote = self.fetcher.fetch(&self.config.origins[idx]).await?;
        tracing::debug!(
            data_source = %remote.name,
            module_count = remote.modules.len(),
            shared_type_count = remote.shared_types.len(),
            "fetched remote"
        );
        self.remote = Some(remote);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Diff and merge
    // ---------------------------------------------------------------------

    /// Recompute the diff between the active local and remote sources
    ///
    /// # Errors
    /// `ConfigNotFound` without an active source; `NoRemote` before a fetch.
    pub fn calc_diffs(&mut self) -> Result<&DiffReport> {
        let start = Instant::now();
        log_op_start!("calc_diffs");

        let (local, remote) = self.sides("calc_diffs", start)?;
        self.diffs = diff_data_sources(local, remote);
        log_op_end!(
            "calc_diffs",
            duration_ms = start.elapsed().as_millis() as u64,
            change_count = self.diffs.change_count()
        );
        Ok(&self.diffs)
    }

    /// Active local slot and remote. A failure closes the `op` log span
    /// started at `start`.
    fn sides(&self, op: &'static str, start: Instant) -> Result<(&DataSource, &DataSource)> {
        let idx = self.current_index(op).map_err(|err| fail(op, start, err))?;
        let local = &self.all_local[idx];
        match self.remote.as_ref() {
            Some(remote) => Ok((local, remote)),
            None => Err(fail(op, start, no_remote(op, &local.name))),
        }
    }

    /// Local slot and remote of the active source, borrowed disjointly
    fn merge_sides(
        &mut self,
        op: &'static str,
        start: Instant,
    ) -> Result<(&mut DataSource, &DataSource)> {
        let idx = self.current_index(op).map_err(|err| fail(op, start, err))?;
        let local = &mut self.all_local[idx];
        match self.remote.as_ref() {
            Some(remote) => Ok((local, remote)),
            None => Err(fail(op, start, no_remote(op, &local.name))),
        }
    }

    /// Accept the remote version of a shared type
    ///
    /// # Errors
    /// `ReferentialIntegrity` when deleting a type local endpoints or shared
    /// types still use;
    /// `ConfigNotFound`/`NoRemote` as for [`calc_diffs`](Self::calc_diffs).
    pub fn merge_shared_type(&mut self, name: &str) -> Result<MergeOutcome> {
        let start = Instant::now();
        log_op_start!("merge_shared_type", shared_type = name);
        let (local, remote) = self.merge_sides("merge_shared_type", start)?;

        let outcome = ops::merge_shared_type(local, remote, name).map_err(|e| {
            fail(
                "merge_shared_type",
                start,
                ExError::from(e).with_op("merge_shared_type"),
            )
        })?;
        if outcome == MergeOutcome::NoOp {
            warn_target_not_found(ApiSyncError::SharedTypeNotFound {
                name: name.to_string(),
            });
        }
        log_op_end!("merge_shared_type", duration_ms = start.elapsed().as_millis() as u64, outcome = ?outcome);
        Ok(outcome)
    }

    /// Accept the remote version of a whole module
    ///
    /// # Errors
    /// `ConfigNotFound`/`NoRemote` as for [`calc_diffs`](Self::calc_diffs).
    pub fn merge_module(&mut self, name: &str) -> Result<MergeOutcome> {
        let start = Instant::now();
        log_op_start!("merge_module", module = name);
        let (local, remote) = self.merge_sides("merge_module", start)?;

        let outcome = ops::merge_module(local, remote, name);
        if outcome == MergeOutcome::NoOp {
            warn_target_not_found(ApiSyncError::ModuleNotFound {
                name: name.to_string(),
            });
        }
        log_op_end!("merge_module", duration_ms = start.elapsed().as_millis() as u64, outcome = ?outcome);
        Ok(outcome)
    }

    /// Accept the remote version of individual endpoints
    ///
    /// # Errors
    /// `ConfigNotFound`/`NoRemote` as for [`calc_diffs`](Self::calc_diffs).
    pub fn merge_endpoints(&mut self, targets: &[EndpointRef]) -> Result<MergeReport> {
        let start = Instant::now();
        log_op_start!("merge_endpoints", targets = targets.len());
        let (local, remote) = self.merge_sides("merge_endpoints", start)?;

        let report = ops::merge_endpoints(local, remote, targets);
        for (target, outcome) in &report.applied {
            if *outcome == MergeOutcome::NoOp {
                warn_target_not_found(ApiSyncError::EndpointNotFound {
                    module: target.module.clone(),
                    endpoint: target.endpoint.clone(),
                });
            }
        }
        log_op_end!(
            "merge_endpoints",
            duration_ms = start.elapsed().as_millis() as u64,
            applied = report.applied.len(),
            skipped = report.skipped.len()
        );
        Ok(report)
    }

    /// Replace the active local source with the remote one
    ///
    /// # Errors
    /// `ConfigNotFound`/`NoRemote` as for [`calc_diffs`](Self::calc_diffs).
    pub fn replace_all(&mut self) -> Result<()> {
        let start = Instant::now();
        log_op_start!("replace_all");
        let (local, remote) = self.merge_sides("replace_all", start)?;
        ops::replace_all(local, remote);
        log_op_end!("replace_all", duration_ms = start.elapsed().as_millis() as u64);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Load the lock strictly and validate every source in it
    ///
    /// # Errors
    /// Snapshot errors from the store; `MissingName` for an unnamed entity;
    /// `ReferentialIntegrity` for an endpoint using an undefined shared type.
    pub async fn check_lock(&self) -> Result<Vec<DataSource>> {
        let out_dir = self.out_dir();
        let sources = blocking("check_lock", move || apisync_store::load_lock(&out_dir)).await?;
        rules::validate_sources(&sources)
            .and_then(|()| sources.iter().try_for_each(rules::validate_references))
            .map_err(|e| ExError::from(e).with_op("check_lock"))?;
        Ok(sources)
    }

    /// Persist every local source. Returns `false` when the lock already
    /// holds exactly this content.
    ///
    /// # Errors
    /// Store errors (`Io`, `Serialization`, `MissingName`).
    pub async fn save_lock(&mut self) -> Result<bool> {
        let digest = sources_digest(&self.all_local);
        if self.saved_digest.as_deref() == Some(digest.as_str()) {
            tracing::debug!("lock unchanged, skipping save");
            return Ok(false);
        }

        let out_dir = self.out_dir();
        let sources = self.all_local.clone();
        blocking("save_lock", move || {
            apisync_store::save_lock(&out_dir, &sources)
        })
        .await?;
        self.saved_digest = Some(digest);
        Ok(true)
    }

    /// Validate, generate and write client files, then persist the lock.
    /// Returns the number of files written.
    ///
    /// # Errors
    /// `MissingName`/`NamingConvention`/`InvalidInput` before anything is
    /// written; generator
    /// and store errors otherwise.
    pub async fn regenerate(&mut self, generator: &dyn CodeGenerator) -> Result<usize> {
        let start = Instant::now();
        log_op_start!("regenerate", session_id = %self.id);

        let result = self.regenerate_inner(generator).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(files) => {
                log_op_end!("regenerate", duration_ms = duration_ms, files = *files);
            }
            Err(err) => log_op_error!("regenerate", err.clone(), duration_ms = duration_ms),
        }
        result
    }

    async fn regenerate_inner(&mut self, generator: &dyn CodeGenerator) -> Result<usize> {
        rules::validate_sources(&self.all_local)
            .and_then(|()| rules::check_naming_convention(&self.all_local))
            .and_then(|()| rules::validate_path_names(&self.all_local))
            .map_err(|e| ExError::from(e).with_op("regenerate"))?;

        let tree = generator
            .generate(&self.all_local, self.config.multiple_origins())
            .map_err(|e| ExError::from(e).with_op("regenerate"))?;

        let out_dir = self.out_dir();
        let files = blocking("write_file_tree", move || {
            apisync_store::write_file_tree(&out_dir, &tree)
        })
        .await?;

        self.save_lock().await?;
        Ok(files)
    }
}

/// Log `err` as the failure of `op` and hand it back
fn fail(op: &'static str, start: Instant, err: ExError) -> ExError {
    log_op_error!(op, err.clone(), duration_ms = start.elapsed().as_millis() as u64);
    err
}

fn warn_target_not_found(err: ApiSyncError) {
    let err = ExError::from(err);
    tracing::warn!(
        err.code = err.code(),
        entity = err.entity().unwrap_or_default(),
        "merge target not found on either side, nothing to do"
    );
}
