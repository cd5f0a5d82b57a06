//! Run orchestration: slice every entity, then publish every variant.
//!
//! Each entity is sliced on its own blocking worker. As soon as an entity's
//! frame set is ready its variants are handed to the store, one publish task
//! per variant, bounded by the configured concurrency. The run always waits
//! for every task to finish and then reports the first error it saw; nothing
//! in flight is cancelled.

use cryptsheet_catalog::{DataRoot, EntityDescriptor, SpriteSource};
use cryptsheet_frames::{FrameError, FrameResult, FrameSetBuilder, ImageVariant};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::publish::{BlobProperties, PublishError, Publisher};

/// Errors that fail a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to process '{entity}': {source}")]
    Entity {
        entity: String,
        #[source]
        source: FrameError,
    },

    #[error("failed to publish '{name}': {source}")]
    Publish {
        name: String,
        #[source]
        source: PublishError,
    },

    #[error("failed to prepare {store} store: {source}")]
    Prepare {
        store: &'static str,
        #[source]
        source: PublishError,
    },

    #[error("worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl RunError {
    /// The frame error behind an entity failure.
    pub fn frame_error(&self) -> Option<&FrameError> {
        match self {
            RunError::Entity { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Totals for a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub entities: usize,
    pub variants: usize,
    pub bytes: u64,
    pub elapsed_ms: u64,
}

struct EntityJob {
    base_name: String,
    handle: JoinHandle<FrameResult<Vec<ImageVariant>>>,
}

fn spawn_entity_jobs(
    entities: Vec<EntityDescriptor>,
    root: &DataRoot,
    builder: &FrameSetBuilder,
) -> Vec<EntityJob> {
    entities
        .into_iter()
        .map(|entity| {
            let base_name = entity.base_name();
            let root = root.clone();
            let builder = builder.clone();
            let handle = tokio::task::spawn_blocking(move || builder.build_source(&entity, &root));
            EntityJob { base_name, handle }
        })
        .collect()
}

fn record(first_error: &mut Option<RunError>, error: RunError) {
    match first_error {
        None => *first_error = Some(error),
        Some(_) => debug!(error = %error, "additional failure"),
    }
}

async fn join_entity(job: EntityJob) -> Result<Vec<ImageVariant>, RunError> {
    match job.handle.await? {
        Ok(variants) => {
            debug!(entity = %job.base_name, variants = variants.len(), "frame set built");
            Ok(variants)
        }
        Err(source) => {
            warn!(entity = %job.base_name, error = %source, "frame set failed");
            Err(RunError::Entity {
                entity: job.base_name,
                source,
            })
        }
    }
}

fn spawn_publish(
    tasks: &mut JoinSet<Result<u64, RunError>>,
    publisher: Arc<dyn Publisher>,
    limiter: Option<Arc<Semaphore>>,
    variant: ImageVariant,
    properties: BlobProperties,
) {
    tasks.spawn(async move {
        // A closed semaphore yields no permit and the upload proceeds unbounded.
        let _permit = match limiter {
            Some(limiter) => limiter.acquire_owned().await.ok(),
            None => None,
        };

        let name = variant.name();
        publisher
            .put(&name, variant.data(), &properties)
            .await
            .map_err(|source| RunError::Publish {
                name: name.clone(),
                source,
            })?;

        let bytes = variant.data().len() as u64;
        info!(name = %name, bytes, "uploaded");
        Ok(bytes)
    });
}

/// Slice every entity and publish all resulting variants.
pub async fn run_pipeline(
    entities: Vec<EntityDescriptor>,
    config: &RunConfig,
    publisher: Arc<dyn Publisher>,
) -> Result<RunReport, RunError> {
    let start = Instant::now();

    publisher
        .prepare()
        .await
        .map_err(|source| RunError::Prepare {
            store: publisher.store_name(),
            source,
        })?;

    let limiter = (config.publish_concurrency > 0)
        .then(|| Arc::new(Semaphore::new(config.publish_concurrency)));
    let jobs = spawn_entity_jobs(entities, &config.data_root(), &config.frame_set_builder());

    let mut first_error = None;
    let mut entities_done = 0;
    let mut publishes = JoinSet::new();

    for job in jobs {
        match join_entity(job).await {
            Ok(variants) => {
                entities_done += 1;
                for variant in variants {
                    spawn_publish(
                        &mut publishes,
                        Arc::clone(&publisher),
                        limiter.clone(),
                        variant,
                        config.blob_properties(),
                    );
                }
            }
            Err(error) => record(&mut first_error, error),
        }
    }

    let mut variants = 0;
    let mut bytes = 0;
    while let Some(joined) = publishes.join_next().await {
        match joined {
            Ok(Ok(size)) => {
                variants += 1;
                bytes += size;
            }
            Ok(Err(error)) => record(&mut first_error, error),
            Err(error) => record(&mut first_error, error.into()),
        }
    }

    if let Some(error) = first_error {
        return Err(error);
    }

    Ok(RunReport {
        entities: entities_done,
        variants,
        bytes,
        elapsed_ms: start.elapsed().as_millis() as u64,
    })
}

/// Slice every entity without publishing.
///
/// Waits for all entities and returns the first failure in catalog order.
pub async fn build_variants(
    entities: Vec<EntityDescriptor>,
    config: &RunConfig,
) -> Result<Vec<ImageVariant>, RunError> {
    let jobs = spawn_entity_jobs(entities, &config.data_root(), &config.frame_set_builder());

    let mut first_error = None;
    let mut all = Vec::new();
    for job in jobs {
        match join_entity(job).await {
            Ok(variants) => all.extend(variants),
            Err(error) => record(&mut first_error, error),
        }
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(all),
    }
}
