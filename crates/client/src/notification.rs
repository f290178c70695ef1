use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError, Weak,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{sync::watch, task::AbortHandle};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_TIMER: AtomicU64 = AtomicU64::new(1);

/// Pending dismiss timers of one notification, one per time it was shown.
type Timers = HashMap<NotificationId, Vec<(u64, AbortHandle)>>;

/// Identity of a notification, assigned at construction.
///
/// Clones of a notification share its id, so removing a clone removes the
/// one that was shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// How long a notification of this kind stays up unless told otherwise.
    pub fn default_duration(self) -> Duration {
        match self {
            Self::Success => Duration::from_millis(5000),
            Self::Error => Duration::from_millis(8000),
            Self::Warning => Duration::from_millis(6000),
            Self::Info => Duration::from_millis(4000),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    /// Auto-dismiss delay; `None` or zero keeps the notification until it is
    /// removed.
    pub duration: Option<Duration>,
    pub dismissible: Option<bool>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            message: message.into(),
            kind,
            duration: None,
            dismissible: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }
}

/// Sink for user-facing notifications.
pub trait Notifier {
    fn show_notification(&self, notification: Notification);
    fn remove_notification(&self, notification: &Notification);
    fn clear_all(&self);
    /// Snapshot of the current list, in the order notifications were shown.
    fn notifications(&self) -> Vec<Notification>;

    fn show_success(&self, message: impl Into<String>) {
        self.show(NotificationKind::Success, message, None);
    }

    fn show_error(&self, message: impl Into<String>) {
        self.show(NotificationKind::Error, message, None);
    }

    fn show_warning(&self, message: impl Into<String>) {
        self.show(NotificationKind::Warning, message, None);
    }

    fn show_info(&self, message: impl Into<String>) {
        self.show(NotificationKind::Info, message, None);
    }

    /// Shows a dismissible notification, falling back to the kind's default
    /// duration.
    fn show(&self, kind: NotificationKind, message: impl Into<String>, duration: Option<Duration>) {
        let duration = duration.unwrap_or_else(|| kind.default_duration());
        self.show_notification(
            Notification::new(kind, message)
                .with_duration(duration)
                .dismissible(true),
        );
    }
}

/// Application-owned notification list with per-notification dismiss timers.
///
/// Cloning shares the same list. Dropping every clone stops pending timers
/// from touching the list.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

struct Inner {
    list: watch::Sender<Vec<Notification>>,
    timers: Mutex<Timers>,
}

impl Inner {
    fn timers(&self) -> MutexGuard<'_, Timers> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drops the bookkeeping of a timer that has fired.
    fn forget_timer(&self, id: NotificationId, seq: u64) {
        let mut timers = self.timers();
        if let Some(pending) = timers.get_mut(&id) {
            pending.retain(|(s, _)| *s != seq);
            if pending.is_empty() {
                timers.remove(&id);
            }
        }
    }

    fn remove(&self, id: NotificationId) -> bool {
        self.list.send_if_modified(|list| {
            let Some(pos) = list.iter().position(|n| n.id == id) else {
                return false;
            };
            list.remove(pos);
            true
        })
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        let (list, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                list,
                timers: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Receiver that observes every change of the list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.inner.list.subscribe()
    }

    fn schedule_removal(&self, id: NotificationId, duration: Duration) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("no async runtime, notification {id:?} will not auto-dismiss");
            return;
        };

        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        let seq = NEXT_TIMER.fetch_add(1, Ordering::Relaxed);
        // Held while spawning so the timer cannot fire before it is registered.
        let mut timers = self.inner.timers();
        let task = runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(inner) = inner.upgrade() {
                inner.forget_timer(id, seq);
                inner.remove(id);
            }
        });
        timers
            .entry(id)
            .or_default()
            .push((seq, task.abort_handle()));
    }

    /// Aborts the oldest pending timer of `id`, matching the occurrence that
    /// `Inner::remove` takes out of the list.
    fn cancel_timer(&self, id: NotificationId) {
        let mut timers = self.inner.timers();
        let Some(pending) = timers.get_mut(&id) else {
            return;
        };
        if !pending.is_empty() {
            let (_, timer) = pending.remove(0);
            timer.abort();
        }
        if pending.is_empty() {
            timers.remove(&id);
        }
    }
}

impl Notifier for NotificationCenter {
    fn show_notification(&self, notification: Notification) {
        log_notification(&notification);

        let id = notification.id;
        let duration = notification.duration.filter(|d| !d.is_zero());
        self.inner.list.send_modify(|list| list.push(notification));

        if let Some(duration) = duration {
            self.schedule_removal(id, duration);
        }
    }

    fn remove_notification(&self, notification: &Notification) {
        self.cancel_timer(notification.id);
        self.inner.remove(notification.id);
    }

    fn clear_all(&self) {
        for (_, pending) in self.inner.timers().drain() {
            for (_, timer) in pending {
                timer.abort();
            }
        }
        self.inner.list.send_modify(Vec::clear);
    }

    fn notifications(&self) -> Vec<Notification> {
        self.inner.list.borrow().clone()
    }
}

fn log_notification(notification: &Notification) {
    let tag = notification.kind.as_str().to_uppercase();
    match notification.kind {
        NotificationKind::Error => tracing::error!("[{tag}] {}", notification.message),
        NotificationKind::Warning => tracing::warn!("[{tag}] {}", notification.message),
        NotificationKind::Success | NotificationKind::Info => {
            tracing::info!("[{tag}] {}", notification.message)
        }
    }
}
