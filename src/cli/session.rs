use crate::cli::commands::Intent;
use crate::model::activity::{Activity, ActivityId};
use crate::model::config::TallyConfig;
use crate::model::view::ViewState;
use crate::ops::pipeline::{CollationError, TitleCollator, derive};
use crate::ops::stats::{Stats, stats};
use crate::ops::store::{ActivityStore, StoreError, ValidationError};

/// Error from applying one intent. Always recoverable; the session goes on.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What the collaborator should draw after an intent
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A new activity was stored
    Added(ActivityId),
    /// The store or the view state changed
    Changed,
    /// Explicit request for the table
    Table,
    /// Explicit request for the totals
    Stats,
    Detail(ActivityId),
    Quit,
}

/// One tracking session: the store and view state it exclusively owns.
pub struct Session {
    store: ActivityStore,
    view: ViewState,
    config: TallyConfig,
    collator: TitleCollator,
}

impl Session {
    /// Fails only if the title collation data cannot be loaded.
    pub fn new(config: TallyConfig) -> Result<Self, CollationError> {
        Ok(Session {
            store: ActivityStore::new(&config.ids.prefix),
            view: ViewState::from_config(&config.view),
            config,
            collator: TitleCollator::new()?,
        })
    }

    /// Apply one intent. The store is left unchanged on error.
    pub fn apply(&mut self, intent: Intent) -> Result<Reply, SessionError> {
        match intent {
            Intent::Add(args) => {
                let id = self.store.add(args.into_candidate())?;
                Ok(Reply::Added(id))
            }
            Intent::Done(arg) => {
                self.store.set_completed(&arg.activity_id(), true)?;
                Ok(Reply::Changed)
            }
            Intent::Undo(arg) => {
                self.store.set_completed(&arg.activity_id(), false)?;
                Ok(Reply::Changed)
            }
            Intent::Rm(arg) => {
                self.store.remove(&arg.activity_id())?;
                Ok(Reply::Changed)
            }
            Intent::Filter { filter } => {
                self.view.set_filter(filter);
                Ok(Reply::Changed)
            }
            Intent::Search { text } => {
                self.view.set_search(&text.join(" "));
                Ok(Reply::Changed)
            }
            Intent::Sort { key } => {
                self.view.set_sort(key);
                Ok(Reply::Changed)
            }
            Intent::List => Ok(Reply::Table),
            Intent::Stats => Ok(Reply::Stats),
            Intent::Show(arg) => {
                let id = arg.activity_id();
                if self.store.get(&id).is_none() {
                    return Err(StoreError::NotFound(id).into());
                }
                Ok(Reply::Detail(id))
            }
            Intent::Quit => Ok(Reply::Quit),
        }
    }

    /// The derived view, recomputed in full
    pub fn rows(&self) -> Vec<&Activity> {
        derive(self.store.all(), &self.view, &self.collator)
    }

    /// Totals over the whole store, ignoring the view
    pub fn stats(&self) -> Stats {
        stats(self.store.all())
    }

    pub fn get(&self, id: &ActivityId) -> Option<&Activity> {
        self.store.get(id)
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn config(&self) -> &TallyConfig {
        &self.config
    }
}
