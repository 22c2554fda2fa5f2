use std::{
    sync::{Mutex, MutexGuard},
    time::Duration,
};

use anyhow::Result;
use tracing::warn;

use crate::service::{bot_session::BotSession, lifecycle, teleport_assist};

/// 一定時間後に実行する操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredAction {
    Greet,
    StopJumping,
    LookAtPlayer { username: String },
}

impl DeferredAction {
    pub fn run(&self, session: &dyn BotSession) -> Result<()> {
        match self {
            DeferredAction::Greet => lifecycle::greet(session),
            DeferredAction::StopJumping => {
                session.set_jumping(false);
                Ok(())
            }
            DeferredAction::LookAtPlayer { username } => {
                // 発火時点でプレイヤーを見失っていれば何もしない
                teleport_assist::look_at_player(session, username)?;
                Ok(())
            }
        }
    }
}

pub trait Scheduler {
    fn schedule(&self, delay: Duration, action: DeferredAction);
}

pub struct TokioScheduler<S> {
    session: S,
}

impl<S> TokioScheduler<S> {
    pub fn new(session: S) -> Self {
        TokioScheduler { session }
    }
}

impl<S> Scheduler for TokioScheduler<S>
where
    S: BotSession + Clone + Send + Sync + 'static,
{
    fn schedule(&self, delay: Duration, action: DeferredAction) {
        let session = self.session.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = action.run(&session) {
                warn!("Deferred action {:?} failed: {:#}", action, e);
            }
        });
    }
}

/// 予約された操作を溜めておき、テストから任意のタイミングで実行する
pub struct DummyScheduler {
    scheduled: Mutex<Vec<(Duration, DeferredAction)>>,
}

impl DummyScheduler {
    pub fn new() -> Self {
        Self {
            scheduled: Mutex::new(Vec::new()),
        }
    }

    fn scheduled_mut(&self) -> MutexGuard<'_, Vec<(Duration, DeferredAction)>> {
        self.scheduled.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn scheduled(&self) -> Vec<(Duration, DeferredAction)> {
        self.scheduled_mut().clone()
    }

    /// 予約済みの操作を予約順にすべて実行して取り除く
    pub fn run_all(&self, session: &dyn BotSession) -> Result<()> {
        let actions: Vec<_> = self.scheduled_mut().drain(..).collect();
        for (_, action) in actions {
            action.run(session)?;
        }
        Ok(())
    }
}

impl Scheduler for DummyScheduler {
    fn schedule(&self, delay: Duration, action: DeferredAction) {
        self.scheduled_mut().push((delay, action));
    }
}
