//! Background render jobs for preview cache misses

use crate::cache::{Lookup, PreviewCache};
use crate::error_sink::WorkerErrorSink;
use crate::preview::{CacheEntry, Previews};
use crate::render::{RenderError, RenderRequest, RenderService, TextStyle};
use crate::settings::PreviewKey;
use crate::wakeup::Waker;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Everything a job needs once it leaves the UI thread
#[derive(Clone)]
struct JobContext {
    cache: Arc<PreviewCache>,
    service: Arc<dyn RenderService>,
    waker: Waker,
    errors: WorkerErrorSink,
    text_style: TextStyle,
    output_dir: PathBuf,
}

/// Issues one render job per missing cache key
pub struct RenderDispatcher {
    ctx: JobContext,
    dispatched: AtomicUsize,
}

impl RenderDispatcher {
    pub fn new(
        service: Arc<dyn RenderService>,
        cache: Arc<PreviewCache>,
        waker: Waker,
        errors: WorkerErrorSink,
        text_style: TextStyle,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            ctx: JobContext {
                cache,
                service,
                waker,
                errors,
                text_style,
                output_dir,
            },
            dispatched: AtomicUsize::new(0),
        }
    }

    /// Entry for `key`, starting a render if no job has ever run for it.
    ///
    /// Never blocks on rendering. A miss returns `Pending`; the UI is woken
    /// once the job has stored its result.
    pub fn request(&self, key: &PreviewKey) -> CacheEntry {
        match self.ctx.cache.lookup_or_begin(key) {
            Lookup::Hit(entry) => entry,
            Lookup::Miss => {
                self.dispatch(key.clone());
                CacheEntry::Pending
            }
        }
    }

    pub fn cache(&self) -> &Arc<PreviewCache> {
        &self.ctx.cache
    }

    /// Number of render jobs started so far
    pub fn jobs_dispatched(&self) -> usize {
        self.dispatched.load(Ordering::SeqCst)
    }

    fn dispatch(&self, key: PreviewKey) {
        self.dispatched.fetch_add(1, Ordering::SeqCst);
        log::debug!(
            "dispatching preview render {}x{} for {}",
            key.width,
            key.height,
            key.settings.font_family
        );

        let ctx = self.ctx.clone();
        let job_key = key.clone();
        let spawned = thread::Builder::new()
            .name("preview-render".to_string())
            .spawn(move || run_job(ctx, job_key));

        if let Err(e) = spawned {
            // The job never ran, finish it here so the key is not left pending
            finish(&self.ctx, &key, Err(RenderError::JobSpawn(e.to_string())));
        }
    }
}

/// Body of a render job
fn run_job(ctx: JobContext, key: PreviewKey) {
    let request = RenderRequest::new(&key, &ctx.text_style, &ctx.output_dir);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        ctx.service.render_family_samples(&request)
    }))
    .unwrap_or_else(|payload| Err(RenderError::Panicked(panic_message(payload.as_ref()))));
    finish(&ctx, &key, outcome);
}

/// Record the outcome, publish into the cache, then wake the UI
fn finish(ctx: &JobContext, key: &PreviewKey, outcome: Result<Previews, RenderError>) {
    let previews = match outcome {
        Ok(previews) if previews.is_complete() => {
            log::debug!("preview render {}x{} complete", key.width, key.height);
            previews
        }
        Ok(previews) => {
            ctx.errors.record(RenderError::Incomplete {
                got: previews.len(),
            });
            previews
        }
        Err(e) => {
            ctx.errors.record(e);
            Previews::new()
        }
    };

    ctx.cache.complete(key, previews);
    ctx.waker.wake();
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
