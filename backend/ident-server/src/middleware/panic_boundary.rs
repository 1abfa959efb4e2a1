use crate::ApiError;

use std::backtrace::Backtrace;
use std::panic;
use std::sync::{Arc, Mutex, Once};

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::error;
use tokio::task::AbortHandle;

/// Where a handler panicked, as seen by the panic hook
#[derive(Debug)]
struct PanicSite {
    location: Option<String>,
    backtrace: String,
}

type PanicSlot = Arc<Mutex<Option<PanicSite>>>;

tokio::task_local! {
    static PANIC_SLOT: PanicSlot;
}

static HOOK: Once = Once::new();

/// Panics inside an isolated task are recorded in its slot; all others go to
/// the hook that was installed before.
fn install_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let recorded = PANIC_SLOT.try_with(|slot| {
                if let Ok(mut site) = slot.lock() {
                    *site = Some(PanicSite {
                        location: info.location().map(ToString::to_string),
                        backtrace: Backtrace::force_capture().to_string(),
                    });
                }
            });

            if recorded.is_err() {
                previous(info);
            }
        }));
    });
}

/// A panic caught by `run_isolated`
#[derive(Debug)]
pub(crate) struct PanicReport {
    pub message: String,
    /// `file:line:column` of the panic
    pub location: Option<String>,
    pub backtrace: Option<String>,
}

/// Aborts the spawned request task if the client goes away first
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Run `fut` in its own task, turning a panic into a `PanicReport`.
pub(crate) async fn run_isolated<F>(fut: F) -> Result<F::Output, PanicReport>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    install_hook();

    let slot = PanicSlot::default();
    let handle = tokio::spawn(PANIC_SLOT.scope(Arc::clone(&slot), fut));
    let _guard = AbortOnDrop(handle.abort_handle());

    match handle.await {
        Ok(output) => Ok(output),
        Err(join_error) => {
            let message = if join_error.is_panic() {
                match join_error.into_panic().downcast::<String>() {
                    Ok(msg) => *msg,
                    Err(any) => match any.downcast::<&str>() {
                        Ok(msg) => msg.to_string(),
                        Err(_) => "Unknown panic".to_string(),
                    },
                }
            } else {
                "Task cancelled".to_string()
            };

            let site = slot.lock().ok().and_then(|mut site| site.take());

            Err(PanicReport {
                message,
                location: site.as_ref().and_then(|s| s.location.clone()),
                backtrace: site.map(|s| s.backtrace),
            })
        }
    }
}

/// Run the rest of the stack in its own task so a panic becomes a 500
/// instead of a dropped connection.
pub async fn panic_boundary(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match run_isolated(next.run(request)).await {
        Ok(response) => response,
        Err(report) => {
            error!(
                "Handler for {} {} panicked at {}: {}",
                method,
                path,
                report.location.as_deref().unwrap_or("unknown location"),
                report.message
            );
            if let Some(backtrace) = &report.backtrace {
                error!("Panic backtrace:\n{}", backtrace);
            }

            ApiError::internal(format!("panic in {method} {path}")).into_response()
        }
    }
}
