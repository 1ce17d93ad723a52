use std::{default::Default, time::Duration};

use crate::{WorkerId, WorkerType};

const WORKER_ID_SUFFIX_LENGTH: usize = 4;

/// Contains Config properties which will be used by a Worker
#[derive(Clone, Debug)]
pub struct WorkerConfig {
    /// Kind of worker process this is
    pub worker_type: WorkerType,
    /// Worker id assigned by the deployment. When absent, one is generated as
    /// `<WorkerType>_<4 random alphanumerics>`
    pub worker_id: Option<WorkerId>,
    /// Used to configure outgoing commands
    pub command: CommandConfig,
}

impl WorkerConfig {
    pub fn new(worker_type: WorkerType) -> Self {
        Self {
            worker_type,
            worker_id: None,
            command: CommandConfig::default(),
        }
    }

    pub fn with_worker_id(mut self, worker_id: &str) -> Self {
        self.worker_id = Some(worker_id.to_string());
        self
    }

    /// Returns the configured worker id, or generates a fresh one
    pub fn resolve_worker_id(&self) -> WorkerId {
        match &self.worker_id {
            Some(worker_id) => worker_id.clone(),
            None => generate_worker_id(self.worker_type),
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self::new(WorkerType::UnityWorker)
    }
}

/// Contains Config properties for commands sent by a Worker
#[derive(Clone, Debug)]
pub struct CommandConfig {
    /// How long a command may stay unresolved before it fails with a Timeout
    pub timeout: Duration,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

/// Tunables for the ship combat rules
#[derive(Clone, Debug)]
pub struct GameplayConfig {
    /// Health every ship spawns with
    pub starting_health: i32,
    /// Health removed by a single cannonball hit
    pub cannonball_damage: i32,
    /// Points awarded to the firer for sinking a ship
    pub points_per_kill: u32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            starting_health: 1000,
            cannonball_damage: 250,
            points_per_kill: 1,
        }
    }
}

pub fn generate_worker_id(worker_type: WorkerType) -> WorkerId {
    let suffix: String = (0..WORKER_ID_SUFFIX_LENGTH)
        .map(|_| fastrand::alphanumeric())
        .collect();
    format!("{}_{}", worker_type.name(), suffix)
}
