// state.rs

use crate::*;

use std::collections::BTreeMap;

pub type ProgressMap = BTreeMap<String, bool>;

pub fn default_checklist() -> ProgressMap {
    STEPS.iter().map(|s| (s.id.to_string(), false)).collect()
}

pub fn default_code_cards() -> ProgressMap {
    CODE_CARDS.iter().map(|c| (c.id.to_string(), false)).collect()
}

pub struct WorkshopState {
    pub settings: AppSettings,
    pub config: RwLock<WorkshopConfig>,
    pub checklist: RwLock<ProgressMap>,
    pub code_cards: RwLock<ProgressMap>,
    pub last_update: RwLock<String>,
    pub api_cnt: AtomicU64,
    store: Box<dyn Storage>,
}

impl WorkshopState {
    /// Loads the three persisted blobs merged against their defaults.
    /// The blobs are independent; a missing or corrupt one never affects
    /// the others.
    pub fn new(settings: AppSettings, store: Box<dyn Storage>) -> Self {
        let config = load_merged(store.as_ref(), CONFIG_KEY, &WorkshopConfig::default());
        let checklist = load_merged(store.as_ref(), CHECKLIST_KEY, &default_checklist());
        let code_cards = load_merged(store.as_ref(), CODE_CARDS_KEY, &default_code_cards());

        WorkshopState {
            settings,
            config: RwLock::new(config),
            checklist: RwLock::new(checklist),
            code_cards: RwLock::new(code_cards),
            last_update: RwLock::new("-".to_string()),
            api_cnt: AtomicU64::new(0),
            store,
        }
    }

    /// Flips the completion flag for a known step and persists the full
    /// map. Returns the new value, or `None` for an unknown id.
    pub async fn toggle_step(&self, id: &str) -> Option<bool> {
        step_index(id)?;
        let value = {
            let mut checklist = self.checklist.write().await;
            let entry = checklist.entry(id.to_string()).or_insert(false);
            *entry = !*entry;
            let value = *entry;
            save_state(self.store.as_ref(), CHECKLIST_KEY, &*checklist);
            value
        };
        self.touch().await;
        Some(value)
    }

    /// Marks a step complete without flipping an already-complete one.
    /// Used by the focus-view Next button.
    pub async fn complete_step(&self, id: &str) -> Option<bool> {
        step_index(id)?;
        {
            let mut checklist = self.checklist.write().await;
            checklist.insert(id.to_string(), true);
            save_state(self.store.as_ref(), CHECKLIST_KEY, &*checklist);
        }
        self.touch().await;
        Some(true)
    }

    pub async fn toggle_card(&self, id: &str) -> Option<bool> {
        CODE_CARDS.iter().position(|c| c.id == id)?;
        let value = {
            let mut cards = self.code_cards.write().await;
            let entry = cards.entry(id.to_string()).or_insert(false);
            *entry = !*entry;
            let value = *entry;
            save_state(self.store.as_ref(), CODE_CARDS_KEY, &*cards);
            value
        };
        self.touch().await;
        Some(value)
    }

    pub async fn reset_steps(&self) {
        let mut checklist = self.checklist.write().await;
        *checklist = default_checklist();
        save_state(self.store.as_ref(), CHECKLIST_KEY, &*checklist);
        drop(checklist);
        self.touch().await;
    }

    pub async fn reset_cards(&self) {
        let mut cards = self.code_cards.write().await;
        *cards = default_code_cards();
        save_state(self.store.as_ref(), CODE_CARDS_KEY, &*cards);
        drop(cards);
        self.touch().await;
    }

    pub async fn set_config(&self, new_config: WorkshopConfig) {
        let mut config = self.config.write().await;
        *config = new_config;
        save_state(self.store.as_ref(), CONFIG_KEY, &*config);
        drop(config);
        self.touch().await;
    }

    pub async fn reset_config(&self) -> WorkshopConfig {
        let defaults = WorkshopConfig::default();
        self.set_config(defaults.clone()).await;
        defaults
    }

    pub async fn progress(&self) -> ProgressView {
        let completed = self.checklist.read().await.values().filter(|v| **v).count();
        let cards_completed = self.code_cards.read().await.values().filter(|v| **v).count();
        ProgressView {
            completed,
            total: STEPS.len(),
            percent: percent_of(completed, STEPS.len()),
            cards_completed,
            cards_total: CODE_CARDS.len(),
            cards_percent: percent_of(cards_completed, CODE_CARDS.len()),
            last_update: self.last_update.read().await.clone(),
        }
    }

    async fn touch(&self) {
        *self.last_update.write().await = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    }
}

pub fn percent_of(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_on<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(fut)
    }

    fn fresh_state() -> WorkshopState {
        WorkshopState::new(AppSettings::default(), Box::new(MemStorage::new()))
    }

    #[test]
    fn toggle_flips_and_persists() {
        block_on(async {
            let state = fresh_state();
            assert_eq!(state.toggle_step("breadboard").await, Some(true));
            assert_eq!(state.toggle_step("breadboard").await, Some(false));
            assert_eq!(state.toggle_step("not_a_step").await, None);

            let progress = state.progress().await;
            assert_eq!(progress.completed, 0);
            assert_eq!(progress.total, STEPS.len());
        });
    }

    #[test]
    fn complete_is_idempotent() {
        block_on(async {
            let state = fresh_state();
            assert_eq!(state.complete_step("install_ide").await, Some(true));
            assert_eq!(state.complete_step("install_ide").await, Some(true));
            assert_eq!(state.progress().await.completed, 1);
        });
    }

    #[test]
    fn reset_restores_every_default() {
        block_on(async {
            let state = fresh_state();
            for step in STEPS {
                state.toggle_step(step.id).await;
            }
            state.toggle_card("setup_wifi").await;
            assert_eq!(state.progress().await.percent, 100);

            state.reset_steps().await;
            state.reset_cards().await;
            let progress = state.progress().await;
            assert_eq!(progress.completed, 0);
            assert_eq!(progress.cards_completed, 0);
            assert!(state.checklist.read().await.values().all(|v| !v));
        });
    }

    #[test]
    fn state_survives_a_reload_from_the_same_store() {
        block_on(async {
            let store = std::sync::Arc::new(MemStorage::new());

            struct Shared(std::sync::Arc<MemStorage>);
            impl Storage for Shared {
                fn get(&self, key: &str) -> Option<String> {
                    self.0.get(key)
                }
                fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
                    self.0.put(key, value)
                }
            }

            let state = WorkshopState::new(AppSettings::default(), Box::new(Shared(store.clone())));
            state.toggle_step("services").await;
            let mut config = WorkshopConfig::default();
            config.topic = "lab/temp".into();
            state.set_config(config).await;

            let reloaded = WorkshopState::new(AppSettings::default(), Box::new(Shared(store)));
            assert_eq!(reloaded.checklist.read().await.get("services"), Some(&true));
            assert_eq!(reloaded.config.read().await.topic, "lab/temp");
        });
    }

    #[test]
    fn percent_rounds_like_the_progress_bar() {
        assert_eq!(percent_of(0, 12), 0);
        assert_eq!(percent_of(1, 12), 8);
        assert_eq!(percent_of(5, 12), 42);
        assert_eq!(percent_of(12, 12), 100);
        assert_eq!(percent_of(0, 0), 0);
    }
}

// EOF
