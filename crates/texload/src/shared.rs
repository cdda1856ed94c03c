//! Reference-counted process-wide resources.
//!
//! The HTTP client is built when the first reader needs it and torn down
//! when the last one goes away. Each user holds a [`Lease`]; dropping it
//! releases the reference.

use std::{
    fmt,
    ops::Deref,
    sync::{
        Arc, LazyLock, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::error::Result;

type Init<R> = Box<dyn Fn() -> Result<R> + Send + Sync>;

struct State<R> {
    count: usize,
    resource: Option<Arc<R>>,
}

/// A lazily built resource shared between any number of leases.
pub struct SharedResource<R> {
    state: Mutex<State<R>>,
    init: Init<R>,
}

impl<R> SharedResource<R> {
    /// Create an empty slot that builds its resource with `init`.
    pub fn new(init: impl Fn() -> Result<R> + Send + Sync + 'static) -> Self {
        Self {
            state: Mutex::new(State {
                count: 0,
                resource: None,
            }),
            init: Box::new(init),
        }
    }

    /// Take a reference, building the resource if this is the first one.
    ///
    /// # Errors
    ///
    /// Returns the initializer's error; the count is left unchanged.
    pub fn acquire(&self) -> Result<Lease<'_, R>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let resource = match state.resource.clone() {
            Some(resource) => resource,
            None => {
                let resource = Arc::new((self.init)()?);
                tracing::debug!("shared resource initialized");
                state.resource = Some(resource.clone());
                resource
            }
        };
        state.count += 1;
        Ok(Lease {
            owner: self,
            resource,
        })
    }

    /// Number of live leases.
    pub fn count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .count
    }

    /// Whether the resource is currently built.
    pub fn is_initialized(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .resource
            .is_some()
    }

    fn release(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.count = state.count.saturating_sub(1);
        if state.count == 0 && state.resource.take().is_some() {
            tracing::debug!("shared resource released");
        }
    }
}

impl<R> fmt::Debug for SharedResource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedResource")
            .field("count", &self.count())
            .finish_non_exhaustive()
    }
}

/// A held reference to a [`SharedResource`].
pub struct Lease<'a, R> {
    owner: &'a SharedResource<R>,
    resource: Arc<R>,
}

impl<R> Deref for Lease<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.resource
    }
}

impl<R> Drop for Lease<'_, R> {
    fn drop(&mut self) {
        self.owner.release();
    }
}

impl<R> fmt::Debug for Lease<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lease").finish_non_exhaustive()
    }
}

static MANAGE_SHARED_CLIENT: AtomicBool = AtomicBool::new(true);

/// The process-wide HTTP client.
pub(crate) static SHARED_CLIENT: LazyLock<SharedResource<reqwest::blocking::Client>> =
    LazyLock::new(|| SharedResource::new(crate::fetch::build_client));

/// Choose whether HTTP clients share one process-wide client. When disabled,
/// each new client owns a private one. Clients already built are unaffected.
pub fn set_manage_shared_client(manage: bool) {
    MANAGE_SHARED_CLIENT.store(manage, Ordering::Relaxed);
}

/// Whether HTTP clients share one process-wide client.
#[must_use]
pub fn manages_shared_client() -> bool {
    MANAGE_SHARED_CLIENT.load(Ordering::Relaxed)
}
